//! Single-user carousel over the cached user list.
//!
//! [`state::Carousel`] holds the cursor and the fetch/create lifecycles;
//! [`controller::CarouselController`] drives it from user commands and
//! request outcomes; [`view::View`] is what observers get to render.

pub mod controller;
pub mod state;
pub mod view;

pub use controller::{CarouselController, CarouselHandle, RetryPolicy};
pub use view::View;
