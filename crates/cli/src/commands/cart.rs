//! Saved cart management.

use std::io::Write;
use std::path::Path;

use credshop_storefront::cart::{Cart, CartStore};
use credshop_storefront::storage::keys;

use super::{CliError, durable_store};

/// Print the saved cart.
pub fn show(data_dir: &Path) -> Result<(), CliError> {
    let store = CartStore::restore(durable_store(data_dir));
    write_cart(&mut std::io::stdout().lock(), store.cart())?;
    Ok(())
}

/// Delete the saved cart.
pub fn clear(data_dir: &Path) -> Result<(), CliError> {
    durable_store(data_dir).remove(keys::CART)?;
    tracing::info!(data_dir = %data_dir.display(), "Cart cleared");
    Ok(())
}

fn write_cart(out: &mut impl Write, cart: &Cart) -> std::io::Result<()> {
    if cart.is_empty() {
        return writeln!(out, "Cart is empty");
    }

    for line in cart.lines() {
        writeln!(
            out,
            "{:>4}  {} x {}  {}",
            line.product.id,
            line.product.title,
            line.qty,
            line.line_total().display_inr()
        )?;
    }
    writeln!(
        out,
        "Total: {} ({} items)",
        cart.total().display_inr(),
        cart.item_count()
    )
}
