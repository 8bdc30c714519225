mod engine;
mod rpc;

use constants::host::MOUNT_SELECTOR;
use engine::core::app_setup::create_app;
use engine::mount::surface::{MountError, attach_surface};

fn main() {
    let surface = match attach_surface(MOUNT_SELECTOR) {
        Ok(surface) => surface,
        Err(e) => {
            report_mount_failure(&e);
            return;
        }
    };

    let mut app = create_app(surface);

    #[cfg(target_arch = "wasm32")]
    {
        wasm_bindgen_futures::spawn_local(async move {
            app.run();
        });
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        app.run();
    }
}

/// The log plugin is not installed yet, so mount failures go straight to the console.
fn report_mount_failure(error: &MountError) {
    let message = format!("Neural background not started: {}", error);

    #[cfg(target_arch = "wasm32")]
    web_sys::console::error_1(&message.into());

    #[cfg(not(target_arch = "wasm32"))]
    eprintln!("{}", message);
}
