pub mod keyboard;
pub mod wheel;

pub use keyboard::wire_keydown;
pub use wheel::wire_wheel;
