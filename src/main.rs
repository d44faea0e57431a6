use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use realty_leads::api::{ApiClient, ProjectQuery};
use realty_leads::config::AppConfig;
use realty_leads::models::PropertyCategory;
use realty_leads::view::cards::ProjectImageStyle;
use realty_leads::view::whatsapp::{whatsapp_url, DEFAULT_WHATSAPP_MESSAGE, DEFAULT_WHATSAPP_NUMBER};
use realty_leads::view::{
    ContactForm, FormField, FormKind, HomePage, ImageResolver, ProjectsSection, PropertyListPage,
};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "realty-leads",
    about = "Browse brokerage projects and properties and submit enquiries",
    version
)]
struct Cli {
    /// Print the fetched records as JSON instead of cards
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Project teaser and featured properties (default)
    Home {
        /// Residential, Commercial, Industrial, Agricultural or All
        #[arg(long)]
        category: Option<String>,
    },
    /// All projects
    Projects {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 6)]
        limit: u32,
    },
    /// Paginated property list
    Properties {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        project_id: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Send an enquiry to the brokerage
    Contact(ContactArgs),
    /// Print a WhatsApp click-to-chat link
    Whatsapp {
        #[arg(long, default_value = DEFAULT_WHATSAPP_NUMBER)]
        phone: String,
        #[arg(long, default_value = DEFAULT_WHATSAPP_MESSAGE)]
        message: String,
    },
}

#[derive(Args, Debug)]
struct ContactArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    phone: String,
    /// Budget in rupees; only leading digits count
    #[arg(long)]
    budget: Option<String>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    message: String,
}

fn category(label: Option<&str>) -> anyhow::Result<Option<PropertyCategory>> {
    Ok(match label {
        Some(label) => PropertyCategory::from_filter(label)?,
        None => None,
    })
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .context("Invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    info!("Using API at {}", config.api.api_base_url);

    let images = ImageResolver::new(config.api.asset_base_url.clone());
    let client = ApiClient::with_config(config.api)?;

    match cli.command.unwrap_or(Command::Home { category: None }) {
        Command::Home { category: label } => {
            let mut home = HomePage::new(images);
            home.properties.select_category(category(label.as_deref())?);
            home.refresh(&client).await;

            if cli.json {
                let projects = home.projects.list().with(|s| s.data().cloned());
                let properties = home.properties.list().with(|s| s.data().cloned());
                print_json(&serde_json::json!({ "projects": projects, "properties": properties }))?;
            } else {
                println!("{}", home.render());
            }
        }
        Command::Projects { page, limit } => {
            let section = ProjectsSection::new(
                ProjectQuery { page, limit },
                ProjectImageStyle::Cover,
                images,
            );
            section.refresh(&client).await;

            if cli.json {
                print_json(&section.list().with(|s| s.data().cloned()))?;
            } else {
                println!("== Our Projects ==\n{}", section.render());
            }
        }
        Command::Properties {
            category: label,
            project_id,
            page,
        } => {
            let mut listing = PropertyListPage::new(images, project_id);
            listing.select_category(category(label.as_deref())?);
            listing.go_to_page(page);
            listing.refresh(&client).await;

            if cli.json {
                print_json(&listing.list().with(|s| s.data().cloned()))?;
            } else {
                println!("{}", listing.render());
            }
        }
        Command::Contact(args) => {
            let mut form = ContactForm::new(FormKind::Contact);
            form.set(FormField::Name, args.name);
            form.set(FormField::Email, args.email);
            form.set(FormField::Phone, args.phone);
            form.set(FormField::Budget, args.budget.unwrap_or_default());
            form.set(FormField::Location, args.location.unwrap_or_default());
            form.set(FormField::Message, args.message);

            let status = form.submit(&client).await?.clone();
            if cli.json {
                print_json(&serde_json::json!({
                    "success": status.success,
                    "message": status.message,
                }))?;
            } else if let Some(banner) = form.render_status() {
                println!("{banner}");
            }
            if !status.success {
                bail!("{}", status.message);
            }
        }
        Command::Whatsapp { phone, message } => {
            let url = whatsapp_url(&phone, &message)?;
            println!("{url}");
        }
    }

    Ok(())
}
