use actix_web::{dev::RequestHead, guard::Guard};
use log::warn;

// A guard that doesn't match makes the router fall
// through to the 404 handler, which is all the admin
// routes need: the PIN is a casual deterrent, not an
// auth system.
pub struct PinGuard {
  admin_pin: String
}

impl PinGuard {
  pub fn new(admin_pin: String) -> Self {
    Self {
      admin_pin
    }
  }
}

impl Guard for PinGuard {
  fn check(&self, req: &RequestHead) -> bool {
    match req.headers.get("x-admin-pin") {
      Some(value) => match value.to_str() {
        Ok(pin) if pin == self.admin_pin => true,
        _ => {
          warn!("Wrong admin PIN sent to {}", req.uri);
          false
        }
      },
      None => false
    }
  }
}
