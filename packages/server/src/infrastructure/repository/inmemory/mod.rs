mod widget_state;

pub use widget_state::InMemoryWidgetStateRepository;
