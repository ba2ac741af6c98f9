use std::collections::HashMap;
use std::sync::Arc;

use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use inquire::Text;

use vetAgenda::clients::booking_client::BookingClient;
use vetAgenda::config::AppConfig;
use vetAgenda::service::breed_service::{BreedLoad, BreedSelect, LOAD_FAILED};
use vetAgenda::service::calendar_feed::{AgendaScope, CalendarFeed, CalendarFilter};
use vetAgenda::service::client_search::{
    ClientSearch, NO_CLIENTS_MESSAGE, NO_PETS_MESSAGE, SearchOutcome,
};
use vetAgenda::service::preview_service::{AvailabilityPreview, PanelState, PreviewBinding};

#[derive(Parser)]
#[command(name = "vetAgenda", about = "Booking helpers for the clinic agenda")]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate how many slots a schedule will generate.
    Preview {
        #[arg(long)]
        start_date: String,
        #[arg(long)]
        end_date: String,
        #[arg(long)]
        start_time: String,
        #[arg(long)]
        end_time: String,
        #[arg(long)]
        duration: String,
    },
    PreviewPrompt {},
    SearchClients {
        query: String,
    },
    Calendar {
        /// Whole clinic agenda instead of the veterinarian's own.
        #[arg(long)]
        clinic: bool,
        #[arg(long)]
        veterinario: Option<String>,
        #[arg(long)]
        estado: Option<String>,
    },
    Breeds {
        especie_id: String,
    },
}

pub async fn cli(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Fine to exit through clap here
    let cli = Cli::parse();
    match cli.command {
        Commands::Preview {
            start_date,
            end_date,
            start_time,
            end_time,
            duration,
        } => {
            let binding = PreviewBinding::default();
            let form = HashMap::from([
                (binding.start_date.clone(), start_date),
                (binding.end_date.clone(), end_date),
                (binding.start_time.clone(), start_time),
                (binding.end_time.clone(), end_time),
                (binding.slot_duration.clone(), duration),
            ]);
            print_preview(&form);
        }
        Commands::PreviewPrompt {} => {
            let binding = PreviewBinding::default();
            let mut form = HashMap::new();
            for (field, label) in [
                (&binding.start_date, "Fecha de inicio (AAAA-MM-DD)"),
                (&binding.end_date, "Fecha de fin (AAAA-MM-DD)"),
                (&binding.start_time, "Hora de inicio (HH:MM)"),
                (&binding.end_time, "Hora de fin (HH:MM)"),
                (&binding.slot_duration, "Duración del turno (minutos)"),
            ] {
                form.insert(field.clone(), Text::new(label).prompt()?);
            }
            print_preview(&form);
        }
        Commands::SearchClients { query } => {
            let client = Arc::new(BookingClient::new(&config.base_url())?);
            let search = ClientSearch::new(client, config.search_debounce()?);
            match search.on_input(&query).await {
                SearchOutcome::Results(cards) => {
                    for card in cards {
                        println!("[{}] {} ({})", card.client.id, card.title, card.pets_badge);
                        println!("    {}", card.contact_line);
                        if card.client.mascotas.is_empty() {
                            println!("    {}", NO_PETS_MESSAGE);
                        }
                        for pet in &card.client.mascotas {
                            println!("    - [{}] {} {}", pet.id, pet.nombre, pet.label());
                        }
                    }
                }
                SearchOutcome::NoResults => println!("{}", NO_CLIENTS_MESSAGE),
                SearchOutcome::Failed(message) => return Err(message.into()),
                SearchOutcome::Cleared | SearchOutcome::Superseded => {
                    println!("Ingrese al menos 2 caracteres");
                }
            }
        }
        Commands::Calendar {
            clinic,
            veterinario,
            estado,
        } => {
            let tz: Tz = config.clinic_timezone()?;
            let scope = if clinic {
                AgendaScope::Clinic
            } else {
                AgendaScope::Veterinarian
            };
            let base_url = config.base_url();
            let client = Arc::new(BookingClient::new(&base_url)?);
            let feed = CalendarFeed::new(client, base_url, scope);
            let events = feed.load(&CalendarFilter { veterinario, estado }).await?;
            for event in &events {
                let when = match (event.starts_at(&tz), event.time_label(&tz)) {
                    (Some(start), Some(label)) => format!("{} {}", start.format("%Y-%m-%d"), label),
                    _ => format!("{} / {}", event.start, event.end),
                };
                println!(
                    "{} {} [{}] -> {}",
                    when,
                    event.title,
                    event.extended_props.estado,
                    feed.detail_path(event)
                );
            }
        }
        Commands::Breeds { especie_id } => {
            let client = BookingClient::new(&config.base_url())?;
            let mut select = BreedSelect::default();
            match select.load(&client, Some(&especie_id), false).await {
                BreedLoad::Failed => return Err(LOAD_FAILED.into()),
                BreedLoad::Cleared => println!("Ingrese una especie"),
                BreedLoad::Loaded => {}
            }
            for breed in &select.options {
                println!("{}\t{}", breed.id, breed.nombre);
            }
        }
    }
    Ok(())
}

// Suppressed previews print nothing.
fn print_preview(form: &HashMap<String, String>) {
    let preview = AvailabilityPreview::new(PreviewBinding::default());
    let mut panel = PanelState::default();
    preview.refresh(form, &mut panel);
    if panel.visible {
        println!("{}", panel.text);
    }
}
