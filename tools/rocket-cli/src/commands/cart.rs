//! Cart commands.

use anyhow::{bail, Result};
use rocket_cart::{CartError, CartStore, UpdateProductAmount};
use rocket_commerce::Cart;
use tokio::sync::mpsc::UnboundedReceiver;

use super::{AddArgs, RemoveArgs, ShowArgs, UpdateArgs};
use crate::context::Context;
use crate::output::format_price;

/// Run the show command.
pub async fn show(args: ShowArgs, ctx: &Context) -> Result<()> {
    let (store, _notices) = ctx.open_store()?;
    let cart = store.cart();

    if args.amounts {
        if ctx.output.is_json() {
            ctx.output.json(&cart.amounts());
        } else {
            for (product_id, amount) in cart.amounts() {
                ctx.output.kv(&product_id.to_string(), &amount.to_string());
            }
        }
        return Ok(());
    }

    print_cart(&cart, ctx);
    Ok(())
}

/// Run the add command.
pub async fn add(args: AddArgs, ctx: &Context) -> Result<()> {
    let (store, notices) = ctx.open_store()?;
    store.add_product(args.product_id).await;
    finish(&store, notices, ctx, &format!("Added product {}", args.product_id))
}

/// Run the remove command.
pub async fn remove(args: RemoveArgs, ctx: &Context) -> Result<()> {
    let (store, notices) = ctx.open_store()?;
    store.remove_product(args.product_id).await;
    finish(&store, notices, ctx, &format!("Removed product {}", args.product_id))
}

/// Run the update command.
pub async fn update(args: UpdateArgs, ctx: &Context) -> Result<()> {
    let (store, notices) = ctx.open_store()?;
    store
        .update_product_amount(UpdateProductAmount::new(args.product_id, args.amount))
        .await;

    match update_confirmation(&args) {
        Some(done) => finish(&store, notices, ctx, &done),
        None => {
            ctx.output.warn(&format!(
                "Amount {} ignored; use `rocket remove {}` to drop the product",
                args.amount, args.product_id
            ));
            print_cart(&store.cart(), ctx);
            Ok(())
        }
    }
}

/// Success line for an update, or `None` when the amount is ignored.
fn update_confirmation(args: &UpdateArgs) -> Option<String> {
    (args.amount > 0).then(|| format!("Set product {} to {}", args.product_id, args.amount))
}

/// Report queued failures, or confirm and print the cart.
fn finish(
    store: &CartStore,
    mut notices: UnboundedReceiver<CartError>,
    ctx: &Context,
    done: &str,
) -> Result<()> {
    let mut failed = None;
    while let Ok(error) = notices.try_recv() {
        ctx.output.debug(&error.detail());
        failed = Some(error);
    }

    if let Some(error) = failed {
        bail!("{}", error);
    }

    ctx.output.success(done);
    print_cart(&store.cart(), ctx);
    Ok(())
}

fn print_cart(cart: &Cart, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(cart);
        return;
    }

    ctx.output.header("Cart");

    if cart.is_empty() {
        ctx.output.info("Your cart is empty.");
        return;
    }

    let widths = [6, 40, 8, 12, 12];
    ctx.output.table_row(&["ID", "PRODUCT", "AMOUNT", "PRICE", "SUBTOTAL"], &widths);

    for item in cart {
        ctx.output.table_row(
            &[
                &item.id.to_string(),
                &item.title,
                &item.amount.to_string(),
                &format_price(item.price),
                &format_price(item.total()),
            ],
            &widths,
        );
    }

    ctx.output.info("");
    ctx.output.kv("Items", &cart.item_count().to_string());
    ctx.output.kv("Total", &format_price(cart.subtotal()));
}
