//! Product request command.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use saho_storefront::product_request::{self, ProductRequestForm};

use super::{Context, attachment};
use crate::output;

#[derive(Subcommand)]
pub enum RequestAction {
    /// Describe a product you would like us to source or build
    Submit(RequestArgs),
}

#[derive(Args)]
pub struct RequestArgs {
    #[arg(short, long)]
    name: String,
    #[arg(short, long)]
    email: String,
    #[arg(short, long)]
    description: String,
    #[arg(short, long)]
    phone: Option<String>,
    #[arg(long)]
    company: Option<String>,
    #[arg(long)]
    country: Option<String>,
    #[arg(long)]
    city: Option<String>,
    #[arg(short, long)]
    quantity: Option<u32>,
    /// Desired delivery date
    #[arg(long)]
    deadline: Option<String>,
    #[arg(long)]
    budget: Option<String>,
    /// Link to a similar product
    #[arg(long)]
    reference_url: Option<String>,
    /// Reference picture to upload
    #[arg(long)]
    image: Option<PathBuf>,
}

impl RequestArgs {
    fn into_parts(self) -> (ProductRequestForm, Option<PathBuf>) {
        let form = ProductRequestForm {
            full_name: self.name,
            email: self.email,
            phone: self.phone,
            company: self.company,
            country: self.country,
            city: self.city,
            description: self.description,
            quantity: self.quantity,
            desired_deadline: self.deadline,
            budget: self.budget,
            reference_url: self.reference_url,
        };
        (form, self.image)
    }
}

pub async fn run(ctx: &Context, action: RequestAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        RequestAction::Submit(args) => {
            let (form, image) = args.into_parts();
            let image = attachment(image.as_deref()).await?;

            match product_request::submit_product_request(&ctx.api, &form, image).await {
                Ok(()) => output::notice(&product_request::success_notice())?,
                Err(e) => {
                    output::notice(&e.notice())?;
                    return Err(e.into());
                }
            }
        }
    }
    Ok(())
}
