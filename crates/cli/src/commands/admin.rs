//! Back-office commands.
//!
//! Every command logs in with `SAHO_ADMIN_EMAIL` / `SAHO_ADMIN_PASSWORD`
//! first; the token lives only for the duration of the command.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use rust_decimal::Decimal;
use saho_admin::{AdminClient, CategoryInput, ProductInput, ProductRequestQuery, QuoteRequestQuery};
use saho_client::Attachment;
use saho_core::{
    CategoryId, Email, ProductId, ProductRequestId, ProductRequestStatus, QuoteRequestId,
    QuoteStatus,
};
use secrecy::SecretString;

use super::{Context, attachment};
use crate::output;

#[derive(Subcommand)]
pub enum AdminAction {
    /// Create and update products
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Create, update and delete categories
    Categories {
        #[command(subcommand)]
        action: CategoryAction,
    },
    /// Handle quote requests
    Quotes {
        #[command(subcommand)]
        action: QuoteAction,
    },
    /// Handle product requests
    Requests {
        #[command(subcommand)]
        action: RequestAction,
    },
    /// Manage back-office accounts
    Users {
        #[command(subcommand)]
        action: UserAction,
    },
}

#[derive(Subcommand)]
pub enum ProductAction {
    /// Create a product
    Create {
        #[command(flatten)]
        fields: ProductFields,
    },
    /// Update a product; only the given fields change
    Update {
        id: String,
        #[command(flatten)]
        fields: ProductFields,
    },
}

#[derive(Args)]
pub struct ProductFields {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    price: Option<Decimal>,
    /// Units in stock
    #[arg(long)]
    stock: Option<i64>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    description_full: Option<String>,
    #[arg(long)]
    dimensions: Option<String>,
    /// Repeatable
    #[arg(long = "material")]
    materials: Vec<String>,
    /// Repeatable
    #[arg(long = "color")]
    colors: Vec<String>,
    /// Category id; repeatable
    #[arg(long = "category")]
    categories: Vec<String>,
    #[arg(long)]
    trending: Option<bool>,
    #[arg(long)]
    disabled: Option<bool>,
    /// Image to upload; repeatable
    #[arg(long = "image")]
    images: Vec<PathBuf>,
}

impl ProductFields {
    fn input(&self) -> ProductInput {
        let non_empty = |values: &Vec<String>| (!values.is_empty()).then(|| values.clone());
        ProductInput {
            name: self.name.clone(),
            price: self.price,
            quantity: self.stock,
            description: self.description.clone(),
            description_full: self.description_full.clone(),
            materials: non_empty(&self.materials),
            colors: non_empty(&self.colors),
            dimensions: self.dimensions.clone(),
            category_ids: (!self.categories.is_empty())
                .then(|| self.categories.iter().map(CategoryId::new).collect()),
            is_trending: self.trending,
            is_disabled: self.disabled,
        }
    }

    async fn images(&self) -> Result<Vec<Attachment>, saho_client::ApiError> {
        let mut images = Vec::with_capacity(self.images.len());
        for path in &self.images {
            images.push(Attachment::from_path(path).await?);
        }
        Ok(images)
    }
}

#[derive(Subcommand)]
pub enum CategoryAction {
    /// Create a category
    Create {
        #[command(flatten)]
        fields: CategoryFields,
    },
    /// Update a category
    Update {
        id: String,
        #[command(flatten)]
        fields: CategoryFields,
    },
    /// Delete a category
    Delete { id: String },
}

#[derive(Args)]
pub struct CategoryFields {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    active: Option<bool>,
    /// Cover image to upload
    #[arg(long)]
    image: Option<PathBuf>,
}

impl CategoryFields {
    fn input(&self) -> CategoryInput {
        CategoryInput {
            name: self.name.clone(),
            description: self.description.clone(),
            is_active: self.active,
        }
    }
}

#[derive(Subcommand)]
pub enum QuoteAction {
    /// List quote requests
    List {
        #[arg(long)]
        status: Option<QuoteStatus>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Show one quote request
    Show { id: String },
    /// Change a quote request's status
    Status { id: String, status: QuoteStatus },
    /// Add a note, optionally attaching the quote PDF
    Note {
        id: String,
        #[arg(short, long)]
        content: String,
        #[arg(long)]
        pdf: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum RequestAction {
    /// List product requests
    List {
        #[arg(long)]
        status: Option<ProductRequestStatus>,
        #[arg(long)]
        email: Option<String>,
        /// Search text
        #[arg(short, long)]
        q: Option<String>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Show one product request
    Show { id: String },
    /// Change a product request's status
    Status {
        id: String,
        status: ProductRequestStatus,
    },
    /// Add a note, optionally with a file
    Note {
        id: String,
        #[arg(short, long)]
        content: String,
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum UserAction {
    /// Create a back-office account
    Create {
        #[arg(short, long)]
        email: Email,
        #[arg(short, long)]
        password: String,
    },
    /// Change the logged-in account's password
    Password {
        #[arg(long)]
        current: String,
        #[arg(long)]
        new: String,
    },
}

pub async fn run(ctx: &Context, action: AdminAction) -> Result<(), Box<dyn std::error::Error>> {
    let admin = ctx.admin().await?;
    let result = dispatch(&admin, action).await;

    if let Err(e) = ctx.api.logout().await {
        tracing::debug!(error = %e, "server logout failed");
    }
    result
}

async fn dispatch(
    admin: &AdminClient,
    action: AdminAction,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        AdminAction::Products { action } => products(admin, action).await,
        AdminAction::Categories { action } => categories(admin, action).await,
        AdminAction::Quotes { action } => quotes(admin, action).await,
        AdminAction::Requests { action } => requests(admin, action).await,
        AdminAction::Users { action } => users(admin, action).await,
    }
}

async fn products(
    admin: &AdminClient,
    action: ProductAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let product = match action {
        ProductAction::Create { fields } => {
            if fields.name.is_none() || fields.price.is_none() {
                return Err("--name and --price are required to create a product".into());
            }
            admin.create_product(&fields.input(), fields.images().await?).await?
        }
        ProductAction::Update { id, fields } => {
            admin
                .update_product(&ProductId::new(id), &fields.input(), fields.images().await?)
                .await?
        }
    };
    output::json(&product)
}

async fn categories(
    admin: &AdminClient,
    action: CategoryAction,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        CategoryAction::Create { fields } => {
            if fields.name.is_none() {
                return Err("--name is required to create a category".into());
            }
            let image = attachment(fields.image.as_deref()).await?;
            output::json(&admin.create_category(&fields.input(), image).await?)
        }
        CategoryAction::Update { id, fields } => {
            let image = attachment(fields.image.as_deref()).await?;
            output::json(
                &admin
                    .update_category(&CategoryId::new(id), &fields.input(), image)
                    .await?,
            )
        }
        CategoryAction::Delete { id } => {
            admin.delete_category(&CategoryId::new(id.clone())).await?;
            output::line(format_args!("Catégorie {id} supprimée"))?;
            Ok(())
        }
    }
}

async fn quotes(
    admin: &AdminClient,
    action: QuoteAction,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        QuoteAction::List {
            status,
            page,
            limit,
        } => {
            let query = QuoteRequestQuery {
                page,
                limit,
                status,
            };
            output::json(&admin.list_quote_requests(&query).await?)
        }
        QuoteAction::Show { id } => {
            output::json(&admin.get_quote_request(&QuoteRequestId::new(id)).await?)
        }
        QuoteAction::Status { id, status } => output::json(
            &admin
                .update_quote_status(&QuoteRequestId::new(id), status)
                .await?,
        ),
        QuoteAction::Note { id, content, pdf } => {
            let pdf = attachment(pdf.as_deref()).await?;
            output::json(
                &admin
                    .add_quote_note(&QuoteRequestId::new(id), &content, pdf)
                    .await?,
            )
        }
    }
}

async fn requests(
    admin: &AdminClient,
    action: RequestAction,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        RequestAction::List {
            status,
            email,
            q,
            page,
            limit,
        } => {
            let query = ProductRequestQuery {
                page,
                limit,
                status,
                email,
                q,
            };
            output::json(&admin.list_product_requests(&query).await?)
        }
        RequestAction::Show { id } => {
            output::json(&admin.get_product_request(&ProductRequestId::new(id)).await?)
        }
        RequestAction::Status { id, status } => output::json(
            &admin
                .update_product_request_status(&ProductRequestId::new(id), status)
                .await?,
        ),
        RequestAction::Note { id, content, file } => {
            let file = attachment(file.as_deref()).await?;
            output::json(
                &admin
                    .add_product_request_note(&ProductRequestId::new(id), &content, file)
                    .await?,
            )
        }
    }
}

async fn users(
    admin: &AdminClient,
    action: UserAction,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        UserAction::Create { email, password } => {
            let user = admin
                .create_user(&email, &SecretString::from(password))
                .await?;
            output::json(&user)
        }
        UserAction::Password { current, new } => {
            admin
                .change_password(&SecretString::from(current), &SecretString::from(new))
                .await?;
            output::line("Mot de passe modifié")?;
            Ok(())
        }
    }
}
