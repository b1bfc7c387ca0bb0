//! Path digitising: each click adds a waypoint, Enter commits the path and
//! Backspace removes the last waypoint.

use anyhow::Result;
use tracing::debug;

use crate::axis::{AxisHandle, AxisView};
use crate::geometry::ScreenPoint;
use crate::renderer::{DragRenderer, WaypointsRenderer};
use crate::selection::{DragSelection, DragSelectionEvent};

use super::{Key, MouseModule};

type PathListener = Box<dyn FnMut(&DragSelection, &[(f64, f64)])>;

pub struct WaypointsMouseModule {
    x_axis: AxisHandle,
    y_axis: AxisHandle,
    renderer: WaypointsRenderer,
    waypoints: Vec<ScreenPoint>,
    listeners: Vec<PathListener>,
    feedback: Option<String>,
}

impl WaypointsMouseModule {
    /// # Arguments
    /// * `width` - Corridor width in pixels drawn around the path
    pub fn new(x_axis: AxisHandle, y_axis: AxisHandle, width: i32) -> Self {
        Self {
            x_axis,
            y_axis,
            renderer: WaypointsRenderer::new(width),
            waypoints: Vec::new(),
            listeners: Vec::new(),
            feedback: None,
        }
    }

    /// Registers a callback receiving each committed path, both as the screen
    /// selection and as data coordinates.
    pub fn add_path_listener(&mut self, listener: impl FnMut(&DragSelection, &[(f64, f64)]) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn waypoints(&self) -> &[ScreenPoint] {
        &self.waypoints
    }

    fn sync(&mut self) {
        self.renderer.set_waypoints(&self.waypoints);
        self.feedback = Some(format!("{} waypoints", self.waypoints.len()));
    }

    fn to_data(&self, p: ScreenPoint) -> (f64, f64) {
        (
            self.x_axis.borrow().inv_transform(f64::from(p.x)),
            self.y_axis.borrow().inv_transform(f64::from(p.y)),
        )
    }

    fn commit(&mut self) {
        if self.waypoints.len() < 2 {
            return;
        }
        let points = std::mem::take(&mut self.waypoints);
        let data: Vec<(f64, f64)> = points.iter().map(|p| self.to_data(*p)).collect();
        let selection = DragSelection::Path {
            points,
            width: self.renderer.width(),
        };
        for listener in self.listeners.iter_mut() {
            listener(&selection, &data);
        }
        debug!(points = data.len(), "waypoint path committed");
        self.renderer.set_waypoints(&[]);
        self.feedback = Some(format!("path of {} points committed", data.len()));
    }
}

impl MouseModule for WaypointsMouseModule {
    fn label(&self) -> &str {
        "Waypoints"
    }

    fn renderer(&self) -> &dyn DragRenderer {
        &self.renderer
    }

    fn renderer_mut(&mut self) -> &mut dyn DragRenderer {
        &mut self.renderer
    }

    fn on_selection(&mut self, event: &DragSelectionEvent) -> Result<()> {
        if let DragSelection::Point(p) = event.selection {
            if self.waypoints.last() != Some(&p) {
                self.waypoints.push(p);
                self.sync();
            }
        }
        Ok(())
    }

    fn key_pressed(&mut self, key: Key) -> Result<()> {
        match key {
            Key::Enter => self.commit(),
            Key::Backspace => {
                if self.waypoints.pop().is_some() {
                    self.sync();
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn cancel(&mut self) {
        self.waypoints.clear();
        self.renderer.set_waypoints(&[]);
    }

    fn feedback(&self) -> Option<String> {
        self.feedback.clone()
    }

    fn clear_feedback(&mut self) {
        self.feedback = None;
    }
}
