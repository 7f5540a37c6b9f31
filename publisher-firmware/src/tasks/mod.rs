// Task-Modul: Enthält alle Embassy Tasks
//
// Jeder Task läuft asynchron und unabhängig.
// Tasks kommunizieren über Embassy Channels und das Notify-Gate
// (Button/HTTP → Fan-out → Broker-Session).

pub mod broker;
pub mod button;
pub mod fanout;
pub mod http;
pub mod wifi;

// Re-export Tasks für einfachen Import
pub use broker::{BrokerHandle, broker_session_task};
pub use button::button_task;
pub use fanout::fanout_task;
pub use http::http_server_task;
pub use wifi::{connection_task, dhcp_task, net_task};
