// Tabspace services
// Services wrap the collaborators around the tab graph: settings on disk and the rendering host.

pub mod render_host;
pub mod settings_engine;
