use bevy::prelude::*;

#[cfg(target_arch = "wasm32")]
use constants::host::CANVAS_ID;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
#[cfg(target_arch = "wasm32")]
use web_sys::HtmlCanvasElement;

/// Fallback surface size for native windows, matching Bevy's default window.
#[cfg(not(target_arch = "wasm32"))]
const NATIVE_SURFACE_SIZE: (f32, f32) = (1280.0, 720.0);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountError {
    NoWindow,
    NoDocument,
    MissingMountTarget(String),
    SurfaceCreation(String),
}

impl std::fmt::Display for MountError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MountError::NoWindow => write!(f, "No browser window available"),
            MountError::NoDocument => write!(f, "Window has no document"),
            MountError::MissingMountTarget(selector) => {
                write!(f, "Mount target '{}' not found", selector)
            }
            MountError::SurfaceCreation(reason) => {
                write!(f, "Failed to create render surface: {}", reason)
            }
        }
    }
}

impl std::error::Error for MountError {}

/// The drawing surface owned by a mounted background.
///
/// Held as a non-send resource: on the web it wraps the canvas element this
/// component appended, and removing the resource is how teardown gives the
/// canvas back to the page.
pub struct MountedSurface {
    pub width: f32,
    pub height: f32,
    #[cfg(target_arch = "wasm32")]
    canvas: HtmlCanvasElement,
}

impl MountedSurface {
    /// A surface with no backing element, used by native builds and tests.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn headless(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn aspect_ratio(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    /// Record the logical size. The canvas backing store belongs to winit
    /// after startup and is left alone.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// Remove the canvas from its container. Consumes the surface.
    pub fn detach(self) {
        #[cfg(target_arch = "wasm32")]
        self.canvas.remove();

        info!("Surface detached ({}x{})", self.width, self.height);
    }
}

/// Create a viewport-sized canvas inside the element matching `selector`.
#[cfg(target_arch = "wasm32")]
pub fn attach_surface(selector: &str) -> Result<MountedSurface, MountError> {
    let window = web_sys::window().ok_or(MountError::NoWindow)?;
    let document = window.document().ok_or(MountError::NoDocument)?;

    let container = document
        .query_selector(selector)
        .ok()
        .flatten()
        .ok_or_else(|| MountError::MissingMountTarget(selector.to_string()))?;

    let canvas = document
        .create_element("canvas")
        .map_err(|e| MountError::SurfaceCreation(format!("{:?}", e)))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| MountError::SurfaceCreation("element is not a canvas".to_string()))?;
    canvas.set_id(CANVAS_ID);

    let dimension = |value: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
    };
    let width = dimension(window.inner_width());
    let height = dimension(window.inner_height());
    canvas.set_width(width as u32);
    canvas.set_height(height as u32);

    container
        .append_child(&canvas)
        .map_err(|e| MountError::SurfaceCreation(format!("{:?}", e)))?;

    info!("Mounted {}x{} canvas into '{}'", width, height, selector);
    Ok(MountedSurface {
        width,
        height,
        canvas,
    })
}

/// Native builds render into the OS window; there is no container to look up.
#[cfg(not(target_arch = "wasm32"))]
pub fn attach_surface(selector: &str) -> Result<MountedSurface, MountError> {
    debug!("Ignoring mount selector '{}' on native target", selector);
    let (width, height) = NATIVE_SURFACE_SIZE;
    Ok(MountedSurface::headless(width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_target_names_the_selector() {
        let error = MountError::MissingMountTarget("#neural-background".to_string());
        assert_eq!(error.to_string(), "Mount target '#neural-background' not found");
    }

    #[test]
    fn resize_records_logical_size() {
        let mut surface = MountedSurface::headless(800.0, 600.0);
        surface.resize(1000.0, 500.0);
        assert_eq!((surface.width, surface.height), (1000.0, 500.0));
        assert_eq!(surface.aspect_ratio(), 2.0);
    }

    #[test]
    fn zero_height_surface_has_unit_aspect() {
        assert_eq!(MountedSurface::headless(640.0, 0.0).aspect_ratio(), 1.0);
    }
}
