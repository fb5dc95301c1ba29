use std::process;

use anyhow::{ensure, Context as _, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use unwinder::{exception_category, throw, Config, Context, Outcome};

exception_category! {
    NOT_ENOUGH_MEMORY = "Not enough memory";
    PET_NOT_FOUND = "Pet not found";
}

#[derive(Parser)]
#[command(name = "pet-store")]
#[command(version = unwinder::VERSION)]
#[command(about = unwinder::DESCRIPTION, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the status of a pet
    Status {
        /// The pet id to look up
        id: i32,

        /// How the lookup handles a missing pet
        #[arg(short, long, value_enum, default_value_t = Strategy::Finally)]
        strategy: Strategy,
    },
    /// Check every pet in the store, plus one that does not exist
    Check,
    /// Open nested TRY blocks
    Nest {
        /// How many blocks to nest
        depth: usize,

        /// Maximum number of nested blocks
        #[arg(long, default_value_t = unwinder::context::DEFAULT_MAX_BLOCKS)]
        max_blocks: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Strategy {
    /// No TRY block: a missing pet terminates the program
    Unguarded,
    /// CATCH the two known categories
    Catch,
    /// CATCH_ALL, aborting on memory exhaustion
    CatchAll,
    /// CATCH plus a FINALLY that reports uncaught failures
    Finally,
    /// FINALLY only: the failure is reported, then terminates the program
    Cleanup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PetStatus {
    Error,
    Unknown,
    Available,
    Pending,
    Sold,
}

struct Pet {
    id: i32,
    name: &'static str,
    status: PetStatus,
}

static PETS: [Pet; 3] = [
    Pet { id: 0, name: "Rocky", status: PetStatus::Available },
    Pet { id: 1, name: "Garfield", status: PetStatus::Pending },
    Pet { id: 2, name: "Rantanplan", status: PetStatus::Sold },
];

/// Returns a pet by id
fn pet_find(ctx: &mut Context, id: i32) -> Outcome<&'static Pet> {
    match PETS.iter().find(|pet| pet.id == id) {
        Some(pet) => Ok(pet),
        None => throw!(ctx, PET_NOT_FOUND, "Pet {} not found", id),
    }
}

fn get_pet_status_unguarded(ctx: &mut Context, id: i32) -> PetStatus {
    // With no enclosing scope a missing pet never returns here.
    match pet_find(ctx, id) {
        Ok(pet) => pet.status,
        Err(_) => PetStatus::Error,
    }
}

fn get_pet_status_catch(ctx: &mut Context, id: i32) -> Outcome<PetStatus> {
    let mut status = PetStatus::Error;
    ctx.attempt(|ctx| {
        status = pet_find(ctx, id)?.status;
        Ok(())
    })
    .catch(&PET_NOT_FOUND, |_| {
        status = PetStatus::Unknown;
        Ok(())
    })
    .catch(&NOT_ENOUGH_MEMORY, |_| process::abort())
    .end()?;
    Ok(status)
}

fn get_pet_status_catch_all(ctx: &mut Context, id: i32) -> Outcome<PetStatus> {
    let mut status = PetStatus::Error;
    ctx.attempt(|ctx| {
        status = pet_find(ctx, id)?.status;
        Ok(())
    })
    .catch_all(|ctx| {
        if ctx.exception().is(&NOT_ENOUGH_MEMORY) {
            process::abort();
        }
        status = PetStatus::Unknown;
        Ok(())
    })
    .end()?;
    Ok(status)
}

fn get_pet_status_finally(ctx: &mut Context, id: i32) -> Outcome<PetStatus> {
    let mut status = PetStatus::Error;
    let mut pet: Option<&'static Pet> = None;
    ctx.attempt(|ctx| {
        let found = pet_find(ctx, id)?;
        pet = Some(found);
        status = found.status;
        Ok(())
    })
    .catch(&PET_NOT_FOUND, |_| {
        status = PetStatus::Unknown;
        Ok(())
    })
    .finally(|ctx| {
        if let Some(pet) = pet.take() {
            tracing::debug!(id = pet.id, name = pet.name, "released pet");
        }
        if ctx.is_uncaught() {
            println!("get_pet_status failed! ({})", ctx.exception().message());
        }
        Ok(())
    })
    .end()?;
    Ok(status)
}

fn get_pet_status_cleanup(ctx: &mut Context, id: i32) -> Outcome<PetStatus> {
    let mut status = PetStatus::Error;
    ctx.attempt(|ctx| {
        status = pet_find(ctx, id)?.status;
        Ok(())
    })
    .finally(|ctx| {
        if ctx.is_uncaught() {
            println!("get_pet_status failed! ({})", ctx.exception().message());
        }
        Ok(())
    })
    .end()?;
    Ok(status)
}

fn get_pet_status(ctx: &mut Context, id: i32, strategy: Strategy) -> Outcome<PetStatus> {
    match strategy {
        Strategy::Unguarded => Ok(get_pet_status_unguarded(ctx, id)),
        Strategy::Catch => get_pet_status_catch(ctx, id),
        Strategy::CatchAll => get_pet_status_catch_all(ctx, id),
        Strategy::Finally => get_pet_status_finally(ctx, id),
        Strategy::Cleanup => get_pet_status_cleanup(ctx, id),
    }
}

fn nest_try_block(ctx: &mut Context, remaining: usize) -> Outcome {
    if remaining == 0 {
        return Ok(());
    }
    ctx.attempt(|ctx| nest_try_block(ctx, remaining - 1))
        .finally(|_| Ok(()))
        .end()
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Status { id, strategy } => {
            let mut ctx = Context::new();
            // Every strategy handles or terminates on its own.
            let status = get_pet_status(&mut ctx, id, strategy).unwrap_or(PetStatus::Error);
            println!("{} {}: {:?}", "pet".bright_green(), id, status);
        }
        Commands::Check => {
            let mut ctx = Context::new();
            let expected = [
                (0, PetStatus::Available),
                (1, PetStatus::Pending),
                (2, PetStatus::Sold),
                (-1, PetStatus::Unknown),
            ];
            for (id, want) in expected {
                let got = get_pet_status_finally(&mut ctx, id).unwrap_or(PetStatus::Error);
                ensure!(got == want, "pet {} has status {:?}, expected {:?}", id, got, want);
                println!("{} pet {}: {:?}", "✓".bright_green(), id, got);
            }
        }
        Commands::Nest { depth, max_blocks } => {
            let config = Config::default().with_max_blocks(max_blocks);
            let mut ctx = Context::with_config(config)
                .with_context(|| format!("Invalid nesting limit: {}", max_blocks))?;
            // Overflow runs the configured abort before returning.
            let _ = nest_try_block(&mut ctx, depth);
            println!("{} nested {} TRY blocks", "✓".bright_green(), depth);
        }
    }

    Ok(())
}
