//! Per-frame scene snapshot handed to whatever draws the room.

use glam::{Mat4, Vec3};
use physics::FloorPanel;

use crate::player::CameraPose;
use crate::targets::TargetView;
use crate::viewmodel::ViewmodelPose;
use crate::weapons::WeaponPhase;

const NEAR_PLANE: f32 = 0.1;
const FAR_PLANE: f32 = 100.0;
const DEFAULT_ASPECT: f32 = 16.0 / 9.0;

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone)]
pub struct SceneFrame {
    pub camera: CameraPose,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub targets: Vec<TargetView>,
    pub reset_board: FloorPanel,
    pub viewmodel: ViewmodelPose,
    pub weapon_phase: WeaponPhase,
    pub muzzle_intensity: f32,
    /// Bloom / post-processing pass enabled.
    pub post_processing: bool,
}

impl SceneFrame {
    /// Get the view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        let eye = self.camera.position;
        let target = eye + self.camera.forward();
        Mat4::look_at_rh(eye, target, Vec3::Y)
    }

    /// Get the projection matrix.
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), aspect, NEAR_PLANE, FAR_PLANE)
    }

    /// Get the combined view-projection matrix.
    pub fn view_projection_matrix(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }

    /// Whether a world point lands inside the view frustum.
    pub fn is_on_screen(&self, point: Vec3, aspect: f32) -> bool {
        let clip = self.view_projection_matrix(aspect) * point.extend(1.0);
        if clip.w <= 0.0 {
            return false;
        }
        let ndc = clip.truncate() / clip.w;
        ndc.x.abs() <= 1.0 && ndc.y.abs() <= 1.0 && (0.0..=1.0).contains(&ndc.z)
    }
}

/// Consumes one [`SceneFrame`] per tick.
pub trait RenderSink {
    fn render(&mut self, frame: &SceneFrame);
}

/// Render sink that writes the frame to the log at trace level.
#[derive(Debug)]
pub struct FrameLog {
    frames: u64,
    aspect: f32,
}

impl Default for FrameLog {
    fn default() -> Self {
        Self::with_aspect(DEFAULT_ASPECT)
    }
}

impl FrameLog {
    pub fn with_aspect(aspect: f32) -> Self {
        Self { frames: 0, aspect }
    }

    /// Viewport width over height.
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl RenderSink for FrameLog {
    fn render(&mut self, frame: &SceneFrame) {
        self.frames += 1;
        if !log::log_enabled!(log::Level::Trace) {
            return;
        }
        let dying = frame.targets.iter().filter(|t| t.is_dying).count();
        let visible = frame
            .targets
            .iter()
            .filter(|t| frame.is_on_screen(t.position, self.aspect))
            .count();
        log::trace!(
            "frame {}: eye {:.2?} yaw {:.3} pitch {:.3} | {} targets ({} dying, {} on screen) | board {}",
            self.frames,
            frame.camera.position,
            frame.camera.yaw,
            frame.camera.pitch,
            frame.targets.len(),
            dying,
            visible,
            if frame.is_on_screen(frame.reset_board.center, self.aspect) { "on screen" } else { "off screen" },
        );
        log::trace!(
            "frame {}: weapon {:?} at {:.2?} pitch {:.3} | muzzle {:.2}{}",
            self.frames,
            frame.weapon_phase,
            frame.viewmodel.offset,
            frame.viewmodel.pitch,
            frame.muzzle_intensity,
            if frame.post_processing { " +fx" } else { "" },
        );
    }
}
