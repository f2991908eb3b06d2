//! Cart commands.

use clap::Subcommand;
use saho_core::ProductId;
use saho_storefront::{CatalogClient, ProductQuery, resolve, subtotal};

use super::Context;
use crate::output;

#[derive(Subcommand)]
pub enum CartAction {
    /// Show the cart with current prices
    Show {
        /// Print stored lines without contacting the server
        #[arg(long)]
        offline: bool,
    },
    /// Add one unit of a product
    Add {
        product_id: String,
        /// Colour variant
        #[arg(short, long)]
        color: Option<String>,
    },
    /// Remove a product
    Remove { product_id: String },
    /// Set a product's quantity (values below 1 become 1)
    Set {
        product_id: String,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Empty the cart
    Clear,
}

pub async fn run(ctx: &Context, action: CartAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut cart = ctx.cart()?;

    match action {
        CartAction::Show { offline } => {
            if cart.is_empty() {
                output::line("Votre panier est vide")?;
                return Ok(());
            }

            if offline {
                for item in cart.items() {
                    let color = item.selected_color.as_deref().unwrap_or("-");
                    output::line(format_args!("{}  x{}  {color}", item.product_id, item.quantity))?;
                }
                return Ok(());
            }

            let products = CatalogClient::new(ctx.api.clone())
                .all_products(&ProductQuery::default())
                .await?;
            let entries = resolve(cart.items(), &products);

            for entry in &entries {
                let color = entry
                    .selected_color
                    .map_or_else(String::new, |c| format!(" ({c})"));
                output::line(format_args!(
                    "{}{color}  x{}  {}  = {}",
                    entry.product.name,
                    entry.quantity,
                    entry.unit_price(),
                    entry.line_total()
                ))?;
            }
            if entries.len() < cart.len() {
                output::line(format_args!(
                    "({} article(s) indisponible(s) masqué(s))",
                    cart.len() - entries.len()
                ))?;
            }
            output::line(format_args!(
                "Total articles ({}): {}",
                cart.total_quantity(),
                subtotal(&entries)
            ))?;
        }
        CartAction::Add { product_id, color } => {
            let id = ProductId::new(product_id);
            cart.add_item(id.clone(), color)?;
            if let Some(line) = cart.get(&id) {
                output::line(format_args!("{id}: {}", line.quantity))?;
            }
        }
        CartAction::Remove { product_id } => {
            cart.remove_item(&ProductId::new(product_id))?;
        }
        CartAction::Set {
            product_id,
            quantity,
        } => {
            let id = ProductId::new(product_id);
            cart.update_quantity(&id, quantity)?;
            if let Some(line) = cart.get(&id) {
                output::line(format_args!("{id}: {}", line.quantity))?;
            }
        }
        CartAction::Clear => cart.clear()?,
    }
    Ok(())
}
