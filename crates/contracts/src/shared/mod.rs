pub mod api_envelope;
pub mod control_state;
pub mod notification;
