//! Cart display helpers for the CLI.

// The CLI's whole job is printing the cart to stdout
#![allow(clippy::print_stdout)]

use shopcart::api::CommerceClient;
use shopcart::notify::TracingNotifier;
use shopcart::persist::FileStore;
use shopcart::store::CartStore;

/// The store the CLI drives: HTTP-backed collaborators, file-backed sink,
/// notices reported through tracing.
pub type CliStore = CartStore<CommerceClient, CommerceClient, FileStore, TracingNotifier>;

/// Print the current cart as a line-per-item listing with a totals row.
pub fn show(store: &CliStore) {
    let cart = store.cart();

    if cart.is_empty() {
        println!("Cart is empty");
        return;
    }

    for line in &cart {
        println!(
            "{:>4} x {:<40} {:>10}  (id {})",
            line.amount,
            line.product.title,
            line.line_total(),
            line.product_id()
        );
    }

    println!("{} item(s), total {}", store.item_count(), store.total());
}
