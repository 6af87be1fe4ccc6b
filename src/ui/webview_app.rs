//! WebView host for the sidebar, using `wry` + `tao`.
//!
//! Architecture:
//! - The configured chat site is loaded directly with `with_url`.
//! - `with_initialization_script` injects the sidebar script on every
//!   document; it waits for the anchor selector, inserts `#cf-root` and
//!   watches the page title.
//! - IPC from JS → Rust via `window.ipc.postMessage({method, params})`,
//!   dispatched through [`rpc_handler::handle_method`].
//! - Rust → JS by evaluating `window.__cf_apply(<response>)` on the event loop.

use std::sync::{Arc, Mutex};

use serde_json::{json, Value};
use tao::event::{Event, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoop, EventLoopBuilder};
use tao::window::WindowBuilder;
use tracing::{debug, error, info};
use wry::WebViewBuilder;

use crate::app::App;
use crate::rpc_handler;
use crate::types::settings::HostSettings;

#[derive(Debug)]
enum UserEvent {
    EvalScript(String),
}

const SIDEBAR_JS: &str = include_str!("../../resources/ui/sidebar.js");
const SIDEBAR_CSS: &str = include_str!("../../resources/ui/sidebar.css");

/// Config object read by the sidebar script, followed by the script itself.
fn initialization_script(host: &HostSettings) -> String {
    let config = json!({"anchor": host.anchor_selector, "css": SIDEBAR_CSS});
    format!("window.__cf_config={};\n{}", config, SIDEBAR_JS)
}

fn apply_script(response: &Value) -> String {
    format!("if(window.__cf_apply)window.__cf_apply({})", response)
}

// ─── IPC handler ───

fn handle_ipc(app: &Mutex<App>, message: &str) -> Option<UserEvent> {
    let msg: Value = serde_json::from_str(message).ok()?;
    let method = msg.get("method")?.as_str()?;
    let params = msg.get("params").cloned().unwrap_or_else(|| json!({}));

    let response = match rpc_handler::handle_method(app, method, &params) {
        Ok(v) => v,
        Err(e) => {
            error!(method, error = %e, "ipc call failed");
            json!({"error": e})
        }
    };
    // Bare title reports that changed nothing need no round trip.
    if method == "host.title_changed"
        && response.get("rerendered") == Some(&Value::Bool(false))
        && response.get("notice") == Some(&Value::Null)
    {
        return None;
    }
    Some(UserEvent::EvalScript(apply_script(&response)))
}

// ─── Main entry point ───

pub fn run() {
    let settings_path = std::env::var("CHATFOLDERS_SETTINGS").ok();
    crate::logging::init(&crate::logging::configured_filter(settings_path.clone()));

    let app = match App::new(settings_path) {
        Ok(app) => app,
        Err(e) => {
            error!(error = %e, "failed to initialize ChatFolders");
            return;
        }
    };
    let host = app.settings().host.clone();
    let state = Arc::new(Mutex::new(app));

    let event_loop: EventLoop<UserEvent> = EventLoopBuilder::with_user_event().build();
    let proxy = event_loop.create_proxy();

    let window = match WindowBuilder::new()
        .with_title("ChatFolders")
        .with_inner_size(tao::dpi::LogicalSize::new(1280.0, 800.0))
        .build(&event_loop)
    {
        Ok(w) => w,
        Err(e) => {
            error!(error = %e, "failed to create window");
            return;
        }
    };

    let ipc_state = state.clone();
    let builder = WebViewBuilder::new()
        .with_initialization_script(&initialization_script(&host))
        .with_url(&host.chat_url)
        .with_ipc_handler(move |msg: wry::http::Request<String>| {
            let body = msg.body().as_str();
            debug!(bytes = body.len(), "ipc message");
            if let Some(event) = handle_ipc(&ipc_state, body) {
                let _ = proxy.send_event(event);
            }
        })
        .with_devtools(cfg!(debug_assertions));

    #[cfg(target_os = "linux")]
    let webview = {
        use tao::platform::unix::WindowExtUnix;
        use wry::WebViewBuilderExtUnix;
        let Some(vbox) = window.default_vbox() else {
            error!("failed to get GTK vbox");
            return;
        };
        builder.build_gtk(vbox)
    };

    #[cfg(not(target_os = "linux"))]
    let webview = builder.build(&window);

    let webview = match webview {
        Ok(w) => w,
        Err(e) => {
            error!(error = %e, "failed to create webview");
            return;
        }
    };
    info!(url = %host.chat_url, "webview started");

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("window closed");
                *control_flow = ControlFlow::Exit;
            }

            Event::UserEvent(UserEvent::EvalScript(js)) => {
                if let Err(e) = webview.evaluate_script(&js) {
                    error!(error = %e, "evaluate_script failed");
                }
            }

            _ => {}
        }
    });
}
