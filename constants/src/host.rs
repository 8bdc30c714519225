/// CSS selector of the page element the canvas is appended to.
pub const MOUNT_SELECTOR: &str = "#neural-background";

/// Id given to the canvas created inside the mount target.
pub const CANVAS_ID: &str = "neural-background-canvas";

/// Seconds between fps notifications to the host page.
pub const FPS_NOTIFY_INTERVAL_SECS: f32 = 0.5;
