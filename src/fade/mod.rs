pub mod clock;
pub mod controller;
pub mod ramp;
pub mod state;
pub mod topic;

pub use clock::{Clock, SystemClock};
pub use controller::FadeController;
pub use ramp::{FADE_STEP, FadeRamp};
pub use state::{LightState, POWER_ON_THRESHOLD};
pub use topic::{ProxyTopics, TopicPair};
