//! Quote request command.

use clap::{Args, Subcommand};
use saho_storefront::quote::{self, QuoteContact};

use super::Context;
use crate::output;

#[derive(Subcommand)]
pub enum QuoteAction {
    /// Send the cart as a quote request; the cart is emptied on success
    Submit(ContactArgs),
}

#[derive(Args)]
pub struct ContactArgs {
    #[arg(short, long)]
    name: String,
    #[arg(short, long)]
    email: String,
    #[arg(short, long)]
    phone: Option<String>,
    #[arg(long)]
    country: Option<String>,
    #[arg(long)]
    city: Option<String>,
    #[arg(long)]
    address: Option<String>,
    #[arg(short, long)]
    message: Option<String>,
}

impl From<ContactArgs> for QuoteContact {
    fn from(args: ContactArgs) -> Self {
        Self {
            full_name: args.name,
            email: args.email,
            phone: args.phone,
            country: args.country,
            city: args.city,
            address: args.address,
            message: args.message,
        }
    }
}

pub async fn run(ctx: &Context, action: QuoteAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        QuoteAction::Submit(args) => {
            let mut cart = ctx.cart()?;
            let contact = QuoteContact::from(args);

            match quote::submit_quote(&ctx.api, &mut cart, &contact).await {
                Ok(()) => output::notice(&quote::success_notice())?,
                Err(e) => {
                    output::notice(&e.notice())?;
                    return Err(e.into());
                }
            }
        }
    }
    Ok(())
}
