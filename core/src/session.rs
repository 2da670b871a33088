// storefront/src/session.rs

//! The pretend login and the navigation guard in front of the views.
//! Any name logs in; there are no passwords or accounts.

use serde::Serialize;
use tracing::{event, Level};

/// Name given to somebody who logs in without typing one.
pub const DEFAULT_USER_NAME: &str = "Пользователь";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum View {
  Home,
  Register,
  Shop,
  ProductDetail,
  Cart,
  Admin,
}

impl View {
  /// Views that need somebody logged in.
  pub fn requires_login(self) -> bool {
    matches!(self, View::Shop | View::Cart | View::ProductDetail)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
  pub name: String,
  pub email: String,
  pub is_admin: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
  user: Option<User>,
}

impl Session {
  pub fn new() -> Self {
    Self::default()
  }

  /// Logs in as `name` and returns the landing view. A blank name logs in
  /// as `DEFAULT_USER_NAME`.
  pub fn login(&mut self, name: impl Into<String>, is_admin: bool) -> View {
    let mut name = name.into();
    if name.trim().is_empty() {
      name = DEFAULT_USER_NAME.to_string();
    }
    event!(Level::INFO, user = %name, is_admin, "User logged in.");
    self.user = Some(User {
      name,
      email: String::new(),
      is_admin,
    });
    if is_admin {
      View::Admin
    } else {
      View::Shop
    }
  }

  pub fn logout(&mut self) {
    self.user = None;
  }

  pub fn user(&self) -> Option<&User> {
    self.user.as_ref()
  }

  pub fn is_authenticated(&self) -> bool {
    self.user.is_some()
  }

  pub fn is_admin(&self) -> bool {
    self.user.as_ref().is_some_and(|u| u.is_admin)
  }

  /// Where a request to go from `current` to `target` actually lands.
  ///
  /// Shop, cart and product detail send anonymous visitors to `Register`.
  /// Admin silently stays on `current` for anyone but an admin.
  pub fn navigate(&self, current: View, target: View) -> View {
    if target.requires_login() && !self.is_authenticated() {
      event!(Level::DEBUG, ?target, "Login required, redirecting to register.");
      return View::Register;
    }
    if target == View::Admin && !self.is_admin() {
      event!(Level::DEBUG, ?current, "Admin view refused.");
      return current;
    }
    target
  }
}
