/// Config for a container
/// ## Fields
/// - `max_depth`:
///   How many producers may be in progress at once during one resolution.
///   Reaching the limit fails the resolution instead of exhausting the stack.
///
///   Child containers inherit the config of the container they were created from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    pub max_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self { max_depth: 256 }
    }
}
