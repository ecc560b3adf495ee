//! Tween targets backed by the viewer camera and the page

use loupe_core::Document;
use loupe_scroll::{Prop, TweenTarget, TweenTargets};
use loupe_viewer::Camera;

/// Borrowed view of everything the showcase tweens animate
pub struct SceneTargets<'a> {
    pub camera: &'a mut Camera,
    pub document: &'a mut Document,
}

impl<'a> SceneTargets<'a> {
    pub fn new(camera: &'a mut Camera, document: &'a mut Document) -> Self {
        Self { camera, document }
    }
}

impl TweenTargets for SceneTargets<'_> {
    fn document(&self) -> &Document {
        self.document
    }

    fn read(&self, target: &TweenTarget, prop: Prop) -> Option<f32> {
        match target {
            TweenTarget::CameraPosition => axis(prop).map(|i| self.camera.position.to_array()[i]),
            TweenTarget::CameraTarget => axis(prop).map(|i| self.camera.target.to_array()[i]),
            TweenTarget::Element(selector) => {
                let style = &self.document.query(selector)?.style;
                match prop {
                    Prop::XPercent => Some(style.x_percent),
                    Prop::Opacity => Some(style.opacity),
                    _ => None,
                }
            }
        }
    }

    fn write(&mut self, target: &TweenTarget, prop: Prop, value: f32) -> bool {
        let vector = match target {
            TweenTarget::CameraPosition => &mut self.camera.position,
            TweenTarget::CameraTarget => &mut self.camera.target,
            TweenTarget::Element(selector) => {
                let Some(element) = self.document.query_mut(selector) else {
                    return false;
                };
                return match prop {
                    Prop::XPercent => {
                        element.style.x_percent = value;
                        true
                    }
                    Prop::Opacity => {
                        element.style.opacity = value.clamp(0.0, 1.0);
                        true
                    }
                    _ => false,
                };
            }
        };

        match prop {
            Prop::X => vector.x = value,
            Prop::Y => vector.y = value,
            Prop::Z => vector.z = value,
            _ => return false,
        }
        true
    }
}

fn axis(prop: Prop) -> Option<usize> {
    match prop {
        Prop::X => Some(0),
        Prop::Y => Some(1),
        Prop::Z => Some(2),
        _ => None,
    }
}
