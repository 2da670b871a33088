// demos/storefront_app/src/main.rs

mod commands;
mod config;
mod errors;
mod state;

use crate::commands::{Command, Outcome};
use crate::config::AppConfig;
use crate::errors::{AppError, Result as AppResult};
use crate::state::AppState;

use std::sync::Arc;
use storefront::{CheckoutHandle, CheckoutPhase, CheckoutReceipt};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> AppResult<()> {
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO)
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // Allow RUST_LOG override
    .with_span_events(FmtSpan::CLOSE)
    .with_writer(std::io::stderr)
    .init();

  tracing::info!("Starting storefront shell...");

  let app_config = match AppConfig::from_env() {
    Ok(cfg) => Arc::new(cfg),
    Err(e) => {
      tracing::error!(error = %e, "Failed to load application configuration.");
      return Err(e);
    }
  };

  let mut state = AppState::new(app_config)?;
  println!("MCR storefront. Type `help` for commands.");

  let mut lines = BufReader::new(tokio::io::stdin()).lines();
  loop {
    print_prompt(&state);
    let Some(line) = lines.next_line().await? else {
      break;
    };

    let outcome = match Command::parse(&line) {
      Ok(Some(command)) => commands::execute(&mut state, command),
      Ok(None) => continue,
      Err(e) => Err(e),
    };

    match outcome {
      Ok(Outcome::Print(text)) => {
        if !text.is_empty() {
          println!("{}", text);
        }
      }
      Ok(Outcome::Checkout(handle)) => match run_checkout(&state, handle).await {
        Ok(Some(receipt)) => {
          state.go(receipt.return_to);
          println!(
            "Paid {} ₽, reference {}. Back to {:?}.",
            receipt.amount, receipt.reference, receipt.return_to
          );
        }
        Ok(None) => println!("Checkout cancelled."),
        Err(e) => report(&e),
      },
      Ok(Outcome::Quit) => break,
      Err(e) if e.is_fatal() => return Err(e),
      Err(e) => report(&e),
    }
  }

  tracing::info!("Storefront shell finished.");
  Ok(())
}

fn print_prompt(state: &AppState) {
  use std::io::Write;
  let who = state.session.user().map(|u| u.name.as_str()).unwrap_or("guest");
  print!("[{} @ {:?}] > ", who, state.view);
  let _ = std::io::stdout().flush();
}

fn report(error: &AppError) {
  tracing::debug!(%error, "Command failed.");
  println!("{}", error);
}

/// Waits out a checkout, echoing phase changes. Ctrl-C drops the handle,
/// which cancels the run and leaves the cart as it was.
async fn run_checkout(state: &AppState, handle: CheckoutHandle) -> AppResult<Option<CheckoutReceipt>> {
  let mut phases = state.checkout.subscribe();
  announce(*phases.borrow_and_update());
  let wait = handle.wait();
  tokio::pin!(wait);

  loop {
    tokio::select! {
      receipt = &mut wait => return Ok(Some(receipt?)),
      changed = phases.changed() => {
        if changed.is_err() {
          return Ok(Some((&mut wait).await?));
        }
        announce(*phases.borrow_and_update());
      }
      _ = tokio::signal::ctrl_c() => return Ok(None),
    }
  }
}

fn announce(phase: CheckoutPhase) {
  match phase {
    CheckoutPhase::Processing => println!("Processing payment..."),
    CheckoutPhase::Success => println!("Payment accepted."),
    CheckoutPhase::Idle => {}
  }
}
