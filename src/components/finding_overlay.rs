use crate::message::Message;
use crate::model::{BoundingBox, Finding};
use iced::mouse;
use iced::widget::canvas::{self, event, Frame, Geometry, Path, Stroke, Text};
use iced::{Color, Pixels, Point, Rectangle, Renderer, Size, Theme};

const SELECTED: Color = Color::from_rgb(0.94, 0.27, 0.27);
const UNSELECTED: Color = Color::from_rgb(0.92, 0.70, 0.03);
const LABEL_HEIGHT: f32 = 18.0;

#[derive(Debug, Clone, PartialEq)]
struct Marker {
    index: usize,
    region: BoundingBox,
    caption: String,
}

/// Canvas program drawing one box per localized finding over an aspect-fit
/// image, and turning clicks on a box into [`Message::SelectFinding`].
#[derive(Debug, Clone)]
pub struct FindingOverlay {
    markers: Vec<Marker>,
    selected: Option<usize>,
    image_size: Option<Size>,
}

impl FindingOverlay {
    pub fn new(
        findings: &[Finding],
        selected: Option<usize>,
        dimensions: Option<(u32, u32)>,
    ) -> Self {
        let markers = findings
            .iter()
            .enumerate()
            .filter_map(|(index, finding)| {
                finding.region().map(|region| Marker {
                    index,
                    region: *region,
                    caption: format!("{} {}%", finding.condition, finding.confidence_percent()),
                })
            })
            .collect();

        Self {
            markers,
            selected,
            image_size: dimensions
                .filter(|(width, height)| *width > 0 && *height > 0)
                .map(|(width, height)| Size::new(width as f32, height as f32)),
        }
    }

    #[cfg(test)]
    fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// Where the image lands inside `bounds` when scaled to fit and centered.
    /// Without known dimensions the whole area is used.
    fn image_box(&self, bounds: Size) -> Rectangle {
        let Some(image) = self.image_size else {
            return Rectangle::new(Point::ORIGIN, bounds);
        };

        let scale = (bounds.width / image.width).min(bounds.height / image.height);
        let fitted = Size::new(image.width * scale, image.height * scale);
        Rectangle::new(
            Point::new(
                (bounds.width - fitted.width) / 2.0,
                (bounds.height - fitted.height) / 2.0,
            ),
            fitted,
        )
    }

    /// Marker rectangle in canvas space, clipped to the image box.
    fn marker_rect(&self, marker: &Marker, bounds: Size) -> Option<Rectangle> {
        let image = self.image_box(bounds);
        let (x, y, width, height) = marker.region.project(
            (image.x, image.y),
            (image.width, image.height),
        );
        Rectangle::new(Point::new(x, y), Size::new(width, height)).intersection(&image)
    }

    /// Topmost marker under `point`.
    fn hit(&self, point: Point, bounds: Size) -> Option<usize> {
        self.markers
            .iter()
            .rev()
            .find(|marker| {
                self.marker_rect(marker, bounds)
                    .is_some_and(|rect| rect.contains(point))
            })
            .map(|marker| marker.index)
    }
}

impl canvas::Program<Message> for FindingOverlay {
    type State = ();

    fn update(
        &self,
        _state: &mut Self::State,
        event: canvas::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> (event::Status, Option<Message>) {
        if let canvas::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) = event {
            if let Some(position) = cursor.position_in(bounds) {
                if let Some(index) = self.hit(position, bounds.size()) {
                    return (event::Status::Captured, Some(Message::SelectFinding(index)));
                }
            }
        }
        (event::Status::Ignored, None)
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());

        for marker in &self.markers {
            let Some(rect) = self.marker_rect(marker, bounds.size()) else {
                continue;
            };
            let is_selected = self.selected == Some(marker.index);
            let color = if is_selected { SELECTED } else { UNSELECTED };

            frame.fill_rectangle(
                rect.position(),
                rect.size(),
                color.scale_alpha(if is_selected { 0.2 } else { 0.1 }),
            );
            frame.stroke(
                &Path::rectangle(rect.position(), rect.size()),
                Stroke::default()
                    .with_color(color.scale_alpha(if is_selected { 1.0 } else { 0.6 }))
                    .with_width(2.0),
            );

            let label_origin = Point::new(rect.x, (rect.y - LABEL_HEIGHT).max(0.0));
            frame.fill_rectangle(
                label_origin,
                Size::new(
                    (marker.caption.len() as f32 * 7.0 + 8.0).min(bounds.width),
                    LABEL_HEIGHT,
                ),
                SELECTED,
            );
            frame.fill_text(Text {
                content: marker.caption.clone(),
                position: Point::new(label_origin.x + 4.0, label_origin.y + 2.0),
                color: Color::WHITE,
                size: Pixels(12.0),
                ..Text::default()
            });
        }

        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        match cursor.position_in(bounds) {
            Some(position) if self.hit(position, bounds.size()).is_some() => {
                mouse::Interaction::Pointer
            }
            _ => mouse::Interaction::default(),
        }
    }
}
