use crate::utils::time_utils::current_timestamp;

/*
 * Counts the hits on the abuse-prone endpoints per
 * unit of time and turns them away entirely for a
 * while once the ceiling is reached.
 */
pub struct BasicRateLimiter {
  counter: u32,
  window_start: i64,
  blocked_until: i64,
  max_requests: u32,
  max_requests_time: u32,
  block_duration: u32
}

impl BasicRateLimiter {

  pub fn new(
    max_requests: u32,
    max_requests_time: u32,
    block_duration: u32
  ) -> Self {
    Self {
      counter: 0,
      window_start: current_timestamp(),
      blocked_until: 0,
      max_requests,
      max_requests_time,
      block_duration
    }
  }

  // Registers one hit, reports whether the caller
  // should be turned away.
  pub fn register_hit(&mut self) -> bool {
    let now = current_timestamp();
    if now < self.blocked_until {
      return true;
    }
    if now - self.window_start >= i64::from(self.max_requests_time) {
      self.window_start = now;
      self.counter = 0;
    }
    self.counter += 1;
    if self.counter > self.max_requests {
      self.blocked_until = now + i64::from(self.block_duration);
      self.window_start = now;
      self.counter = 0;
      return true;
    }
    false
  }

}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn blocks_after_too_many_hits() {
    let mut limiter = BasicRateLimiter::new(3, 60, 60);
    assert!(!limiter.register_hit());
    assert!(!limiter.register_hit());
    assert!(!limiter.register_hit());
    assert!(limiter.register_hit());
    // Still blocked on the next hit:
    assert!(limiter.register_hit());
  }

  #[test]
  fn stays_open_below_the_ceiling() {
    let mut limiter = BasicRateLimiter::new(10, 60, 60);
    for _ in 0..5 {
      assert!(!limiter.register_hit());
    }
  }
}
