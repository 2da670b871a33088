// demos/storefront_app/src/commands.rs

//! Line commands understood by the shell, and what each one does to the
//! session state.

use crate::errors::{AppError, Result};
use crate::state::AppState;
use std::fmt::Write as _;
use storefront::{CategoryFilter, CheckoutHandle, Product, ProductDraft, StoreError, View};

pub const HELP: &str = "\
Commands:
  login [name]          log in (blank name is fine)
  logout
  go <view>             home | register | shop | product | cart | admin
  shop                  list products matching the current filter
  search [text]         filter by name, blank clears
  category <label>      filter by category, `Все` clears
  show <id>             open a product
  size <label>          pick a size for the open product
  add                   add the open product in the picked size to the cart
  buy                   buy the open product right away
  cart                  show the cart
  remove <id> <size>    drop a cart line
  checkout              pay for the whole cart (Ctrl-C cancels)
  admin list | admin save <json> | admin delete <id> | admin reset
  help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
  Help,
  Login(String),
  Logout,
  Go(View),
  Shop,
  Search(String),
  Category(String),
  Show(u64),
  Size(String),
  Add,
  Buy,
  Cart,
  Remove(u64, String),
  Checkout,
  AdminList,
  AdminSave(String),
  AdminDelete(u64),
  AdminReset,
  Quit,
}

/// What the shell should do after a command ran.
pub enum Outcome {
  Print(String),
  Checkout(CheckoutHandle),
  Quit,
}

impl Command {
  /// Parses one input line. Blank lines yield `None`.
  pub fn parse(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() {
      return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
      Some((word, rest)) => (word, rest.trim()),
      None => (line, ""),
    };

    let command = match word {
      "help" | "?" => Command::Help,
      "login" => Command::Login(rest.to_string()),
      "logout" => Command::Logout,
      "go" => Command::Go(parse_view(rest)?),
      "shop" | "ls" => Command::Shop,
      "search" => Command::Search(rest.to_string()),
      "category" => Command::Category(required(rest, "category <label>")?.to_string()),
      "show" => Command::Show(parse_id(rest)?),
      "size" => Command::Size(required(rest, "size <label>")?.to_string()),
      "add" => Command::Add,
      "buy" => Command::Buy,
      "cart" => Command::Cart,
      "remove" => {
        let (id, size) = rest
          .split_once(char::is_whitespace)
          .ok_or_else(|| AppError::Usage("remove <id> <size>".to_string()))?;
        Command::Remove(parse_id(id)?, size.trim().to_string())
      }
      "checkout" => Command::Checkout,
      "admin" => parse_admin(rest)?,
      "quit" | "exit" => Command::Quit,
      other => return Err(AppError::Usage(format!("unknown command '{}', try `help`", other))),
    };
    Ok(Some(command))
  }
}

fn required<'a>(rest: &'a str, usage: &str) -> Result<&'a str> {
  if rest.is_empty() {
    Err(AppError::Usage(usage.to_string()))
  } else {
    Ok(rest)
  }
}

fn parse_id(raw: &str) -> Result<u64> {
  raw
    .trim()
    .trim_start_matches('#')
    .parse()
    .map_err(|_| AppError::Usage(format!("'{}' is not a product id", raw.trim())))
}

fn parse_view(raw: &str) -> Result<View> {
  match raw {
    "home" => Ok(View::Home),
    "register" => Ok(View::Register),
    "shop" => Ok(View::Shop),
    "product" => Ok(View::ProductDetail),
    "cart" => Ok(View::Cart),
    "admin" => Ok(View::Admin),
    _ => Err(AppError::Usage("go home|register|shop|product|cart|admin".to_string())),
  }
}

fn parse_admin(rest: &str) -> Result<Command> {
  let (action, arg) = match rest.split_once(char::is_whitespace) {
    Some((action, arg)) => (action, arg.trim()),
    None => (rest, ""),
  };
  match action {
    "list" => Ok(Command::AdminList),
    "save" => Ok(Command::AdminSave(required(arg, "admin save <product json>")?.to_string())),
    "delete" => Ok(Command::AdminDelete(parse_id(arg)?)),
    "reset" => Ok(Command::AdminReset),
    _ => Err(AppError::Usage("admin list|save <json>|delete <id>|reset".to_string())),
  }
}

/// Navigates to `view` and fails unless the guard let us in.
fn enter(state: &mut AppState, view: View) -> Result<()> {
  let landed = state.go(view);
  if landed == view {
    return Ok(());
  }
  if landed == View::Register {
    Err(AppError::Denied("log in first (`login <name>`)".to_string()))
  } else {
    Err(AppError::Denied("the admin view is for administrators only".to_string()))
  }
}

fn selected(state: &AppState) -> Result<&(Product, Option<String>)> {
  state
    .selected
    .as_ref()
    .ok_or_else(|| AppError::Usage("open a product first (`show <id>`)".to_string()))
}

fn product_line(out: &mut String, product: &Product) {
  let _ = writeln!(
    out,
    "#{:<3} {:<32} {:<16} {:>7} ₽  [{}]",
    product.id,
    product.name,
    product.category,
    product.price,
    product.sizes.join(", ")
  );
}

pub fn execute(state: &mut AppState, command: Command) -> Result<Outcome> {
  tracing::debug!(?command, view = ?state.view, "Executing command.");
  let mut out = String::new();

  match command {
    Command::Help => out.push_str(HELP),
    Command::Quit => return Ok(Outcome::Quit),
    Command::Login(name) => {
      let is_admin = state.config.is_admin_name(name.trim());
      state.view = state.session.login(name.trim(), is_admin);
      let user = state.session.user().map(|u| u.name.as_str()).unwrap_or_default();
      let _ = write!(out, "Welcome, {}. Now in {:?}.", user, state.view);
    }
    Command::Logout => {
      state.session.logout();
      state.go(View::Home);
      out.push_str("Logged out.");
    }
    Command::Go(view) => {
      let landed = state.go(view);
      let _ = write!(out, "Now in {:?}.", landed);
    }
    Command::Shop => {
      enter(state, View::Shop)?;
      let query = state.query.clone();
      let listing = state.listing();
      let matches = query.apply(listing);
      if matches.is_empty() {
        out.push_str("Nothing matches the current filter.");
      }
      for product in matches {
        product_line(&mut out, product);
      }
    }
    Command::Search(text) => {
      state.query.search = text;
      return execute(state, Command::Shop);
    }
    Command::Category(label) => {
      state.query.category = CategoryFilter::from_label(&label);
      return execute(state, Command::Shop);
    }
    Command::Show(id) => {
      enter(state, View::ProductDetail)?;
      let product = state
        .store
        .get(id)
        .ok_or_else(|| AppError::NotFound(format!("product #{}", id)))?;
      product_line(&mut out, &product);
      out.push_str(&product.description);
      state.selected = Some((product, None));
    }
    Command::Size(size) => {
      let (product, _) = selected(state)?;
      if !product.offers_size(&size) {
        return Err(AppError::Usage(format!(
          "'{}' is not offered, pick one of: {}",
          size,
          product.sizes.join(", ")
        )));
      }
      let _ = write!(out, "Size {} selected.", size);
      if let Some((_, picked)) = state.selected.as_mut() {
        *picked = Some(size);
      }
    }
    Command::Add => {
      let (product, size) = selected(state)?;
      let size = size.clone().ok_or(StoreError::SizeNotSelected)?;
      let mut cart = state.cart.write();
      let line = cart.add(product, size);
      let _ = write!(out, "{} ({}) x{} in cart.", line.product.name, line.selected_size, line.quantity);
    }
    Command::Buy => {
      let (product, size) = selected(state)?;
      let handle = state.checkout.buy_now(product, size.as_deref())?;
      return Ok(Outcome::Checkout(handle));
    }
    Command::Cart => {
      enter(state, View::Cart)?;
      let cart = state.cart.read();
      if cart.is_empty() {
        out.push_str("The cart is empty.");
      }
      for line in cart.items() {
        let _ = writeln!(
          out,
          "#{:<3} {:<32} {:<8} x{:<3} {:>8} ₽",
          line.product.id,
          line.product.name,
          line.selected_size,
          line.quantity,
          line.line_total()
        );
      }
      if !cart.is_empty() {
        let _ = write!(out, "{} items, total {} ₽", cart.count(), cart.total());
      }
    }
    Command::Remove(id, size) => {
      let removed = state.cart.write().remove(id, &size);
      match removed {
        Some(line) => {
          let _ = write!(out, "Removed {} ({}).", line.product.name, line.selected_size);
        }
        None => return Err(AppError::NotFound(format!("cart line #{} {}", id, size))),
      }
    }
    Command::Checkout => {
      enter(state, View::Cart)?;
      let handle = state.checkout.checkout_cart(&state.cart)?;
      return Ok(Outcome::Checkout(handle));
    }
    Command::AdminList => {
      enter(state, View::Admin)?;
      for product in state.listing() {
        product_line(&mut out, product);
      }
    }
    Command::AdminSave(json) => {
      enter(state, View::Admin)?;
      let draft: ProductDraft = serde_json::from_str(&json)?;
      draft.validate()?;
      let saved = state.store.save(draft)?;
      let _ = write!(out, "Saved #{} {}.", saved.id, saved.name);
    }
    Command::AdminDelete(id) => {
      enter(state, View::Admin)?;
      state.store.delete(id)?;
      let _ = write!(out, "Deleted #{}.", id);
    }
    Command::AdminReset => {
      enter(state, View::Admin)?;
      state.store.reset()?;
      out.push_str("Catalog reset to the default collection.");
    }
  }

  Ok(Outcome::Print(out.trim_end().to_string()))
}
