use chrono::Local;
use clap::Parser;
use staybook::config::{CliConfig, Command, Credentials};
use staybook::core::catalog::properties;
use staybook::core::pricing::{format_date, is_valid_date_range_from_today};
use staybook::domain::model::{BookingRequest, BookingStatus};
use staybook::domain::ports::Storage;
use staybook::utils::error::{ErrorSeverity, StayError};
use staybook::utils::{logger, validation::Validate};
use staybook::{Result, Staybook, TomlConfig};
use std::path::Path;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 載入配置，CLI 參數優先
    let mut config = match &cli.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        },
        None => TomlConfig::default(),
    };
    if let Some(data_dir) = &cli.data_dir {
        config.storage.data_dir = data_dir.clone();
    }

    logger::init_logger(cli.verbose, config.log_level(), config.log_format());
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let backend = match config.open_backend() {
        Ok(backend) => backend,
        Err(e) => exit_with(e),
    };
    tracing::info!(
        "Using {} storage at {}",
        backend.name(),
        config.storage.data_dir
    );

    let app = Staybook::new(backend);
    if let Err(e) = run(&app, cli.command).await {
        exit_with(e);
    }
}

fn exit_with(e: StayError) -> ! {
    tracing::error!(
        "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 4,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

fn login<S: Storage + Clone>(
    app: &Staybook<S>,
    credentials: &Credentials,
) -> Result<staybook::domain::model::AuthenticatedUser> {
    app.login(&credentials.email, &credentials.password)
}

fn display_date(value: &str) -> String {
    format_date(value).unwrap_or_else(|_| value.to_string())
}

async fn run<S: Storage + Clone>(app: &Staybook<S>, command: Command) -> Result<()> {
    match command {
        Command::Properties => {
            for property in properties() {
                println!(
                    "[{}] {} ({}) - {} - ${}/night, up to {} guests",
                    property.id,
                    property.title,
                    property.details.property_type.label(),
                    property.location_label(),
                    property.pricing.base_price,
                    property.details.max_guests
                );
            }
        }
        Command::Quote {
            property,
            check_in,
            check_out,
        } => {
            if !is_valid_date_range_from_today(&check_in, &check_out) {
                println!("⚠️  This date range could not be booked today");
            }
            let (property, calc) = app.quote(&property, &check_in, &check_out)?;
            println!("{}", property.title);
            println!(
                "{} -> {}",
                display_date(&check_in),
                display_date(&check_out)
            );
            println!(
                "${} x {} nights = ${}",
                property.pricing.base_price, calc.nights, calc.base_price
            );
            println!("Cleaning fee: ${}", calc.cleaning_fee);
            println!("Total: ${}", calc.total);
        }
        Command::Book {
            credentials,
            property,
            check_in,
            check_out,
            guests,
        } => {
            let guest = login(app, &credentials)?;
            let request = BookingRequest {
                property_id: property,
                check_in_date: check_in,
                check_out_date: check_out,
                guest_count: guests,
            };
            let booking = app.book(&guest, &request, Local::now().date_naive()).await?;
            println!("✅ Booking confirmed: {}", booking.id);
            println!(
                "{} | {} nights | total ${}",
                booking.property_title, booking.nights, booking.total_price
            );
        }
        Command::Bookings { credentials } => {
            let guest = login(app, &credentials)?;
            let bookings = app.my_bookings(&guest).await?;
            if bookings.is_empty() {
                println!("No bookings yet");
            }
            for booking in bookings {
                println!(
                    "{} [{}] {} | {} -> {} | {} guests | ${}",
                    booking.id,
                    booking.status,
                    booking.property_title,
                    display_date(&booking.check_in_date.to_string()),
                    display_date(&booking.check_out_date.to_string()),
                    booking.guest_count,
                    booking.total_price
                );
            }
        }
        Command::Status { id, status } => {
            let status: BookingStatus = status
                .parse()
                .map_err(|message| StayError::ValidationError { message })?;
            if app.bookings().update_status(&id, status).await? {
                println!("✅ {} is now {}", id, status);
            } else {
                return Err(StayError::NotFound {
                    entity: "booking",
                    id,
                });
            }
        }
        Command::Delete { id } => {
            if app.bookings().delete(&id).await? {
                println!("🗑️  Deleted {}", id);
            } else {
                println!("Nothing to delete for {}", id);
            }
        }
        Command::Contact {
            credentials,
            property,
            booking,
        } => {
            let guest = login(app, &credentials)?;
            let conversation = app.contact_host(&guest, &property, booking).await?;
            println!(
                "💬 Conversation {} with {} about {}",
                conversation.id, conversation.host_name, conversation.property_title
            );
        }
        Command::Conversations { credentials } => {
            let user = login(app, &credentials)?;
            for conversation in app.my_conversations(&user).await? {
                let preview = conversation
                    .last_message
                    .as_ref()
                    .map(|m| format!("{}: {}", m.sender_name, m.content))
                    .unwrap_or_else(|| "(no messages)".to_string());
                println!(
                    "{} | {} | {} & {} | {} new | {}",
                    conversation.id,
                    conversation.property_title,
                    conversation.guest_name,
                    conversation.host_name,
                    conversation.unread_count,
                    preview
                );
            }
        }
        Command::Send {
            credentials,
            conversation,
            content,
        } => {
            let sender = login(app, &credentials)?;
            let message = app.send(&sender, &conversation, &content).await?;
            println!("📨 Sent {} at {}", message.id, message.timestamp.to_rfc3339());
        }
        Command::Messages {
            credentials,
            conversation,
        } => {
            let user = login(app, &credentials)?;
            for message in app.conversation_messages(&user, &conversation).await? {
                println!(
                    "[{}] {} ({}): {}",
                    message.timestamp.format("%Y-%m-%d %H:%M"),
                    message.sender_name,
                    message.sender_role,
                    message.content
                );
            }
        }
        Command::Export { out_dir } => {
            app.export_to_dir(Path::new(&out_dir)).await?;
            println!("📁 Exported to {}", out_dir);
        }
        Command::Import { from_dir } => {
            let count = app.import_from_dir(Path::new(&from_dir)).await?;
            println!("📥 Imported {} records", count);
        }
    }

    Ok(())
}
