//! Property descriptors that expose fields of a target to a tweak panel.
//!
//! A [`DebugPanel<T>`] never holds a reference to its target. Every read and
//! write receives the target explicitly, so the panel can live next to the
//! state it edits without aliasing it.

use std::fmt;

use crate::error::BindingError;
use crate::math::Color;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertyValue {
    Number(f32),
    Color(Color),
    Bool(bool),
}

impl PropertyValue {
    pub fn as_number(self) -> Option<f32> {
        match self {
            PropertyValue::Number(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_color(self) -> Option<Color> {
        match self {
            PropertyValue::Color(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_bool(self) -> Option<bool> {
        match self {
            PropertyValue::Bool(b) => Some(b),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertyKind {
    /// Slider; values are clamped to [min, max] and snapped to min + k * step
    Number { min: f32, max: f32, step: f32 },
    Color,
    Toggle,
    /// Button running a callback
    Action,
}

impl PropertyKind {
    fn expected(&self) -> &'static str {
        match self {
            PropertyKind::Number { .. } => "number",
            PropertyKind::Color => "color",
            PropertyKind::Toggle => "bool",
            PropertyKind::Action => "action",
        }
    }

    /// Validate and normalize an incoming value for this kind
    fn accept(&self, label: &str, value: PropertyValue) -> Result<PropertyValue, BindingError> {
        let mismatch = || BindingError::TypeMismatch { label: label.to_string(), expected: self.expected() };
        match (*self, value) {
            (PropertyKind::Number { min, max, step }, PropertyValue::Number(v)) => {
                if v.is_nan() {
                    return Err(mismatch());
                }
                Ok(PropertyValue::Number(snap(v, min, max, step)))
            }
            (PropertyKind::Color, PropertyValue::Color(_)) | (PropertyKind::Toggle, PropertyValue::Bool(_)) => {
                Ok(value)
            }
            _ => Err(mismatch()),
        }
    }
}

fn snap(value: f32, min: f32, max: f32, step: f32) -> f32 {
    let clamped = value.clamp(min, max);
    if step > 0.0 {
        (min + ((clamped - min) / step).round() * step).clamp(min, max)
    } else {
        clamped
    }
}

pub type Getter<T> = Box<dyn Fn(&T) -> PropertyValue>;
pub type Setter<T> = Box<dyn Fn(&mut T, PropertyValue)>;
pub type ActionFn<T> = Box<dyn Fn(&mut T)>;
pub type ChangeFn<T> = Box<dyn Fn(&mut T, PropertyValue)>;

enum Access<T> {
    Value { get: Getter<T>, set: Setter<T> },
    Action(ActionFn<T>),
}

/// One labelled control bound to a field of `T`
pub struct Property<T> {
    pub label: String,
    pub kind: PropertyKind,
    /// Folder this property was added under, if any
    pub folder: Option<String>,
    access: Access<T>,
    on_change: Option<ChangeFn<T>>,
}

impl<T> Property<T> {
    pub fn number(
        label: impl Into<String>,
        min: f32,
        max: f32,
        step: f32,
        get: impl Fn(&T) -> f32 + 'static,
        set: impl Fn(&mut T, f32) + 'static,
    ) -> Self {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        Self::value(
            label,
            PropertyKind::Number { min: lo, max: hi, step },
            move |t| PropertyValue::Number(get(t)),
            move |t, v| {
                if let Some(n) = v.as_number() {
                    set(t, n)
                }
            },
        )
    }

    pub fn color(
        label: impl Into<String>,
        get: impl Fn(&T) -> Color + 'static,
        set: impl Fn(&mut T, Color) + 'static,
    ) -> Self {
        Self::value(
            label,
            PropertyKind::Color,
            move |t| PropertyValue::Color(get(t)),
            move |t, v| {
                if let Some(c) = v.as_color() {
                    set(t, c)
                }
            },
        )
    }

    pub fn toggle(
        label: impl Into<String>,
        get: impl Fn(&T) -> bool + 'static,
        set: impl Fn(&mut T, bool) + 'static,
    ) -> Self {
        Self::value(
            label,
            PropertyKind::Toggle,
            move |t| PropertyValue::Bool(get(t)),
            move |t, v| {
                if let Some(b) = v.as_bool() {
                    set(t, b)
                }
            },
        )
    }

    pub fn action(label: impl Into<String>, run: impl Fn(&mut T) + 'static) -> Self {
        Self {
            label: label.into(),
            kind: PropertyKind::Action,
            folder: None,
            access: Access::Action(Box::new(run)),
            on_change: None,
        }
    }

    fn value(
        label: impl Into<String>,
        kind: PropertyKind,
        get: impl Fn(&T) -> PropertyValue + 'static,
        set: impl Fn(&mut T, PropertyValue) + 'static,
    ) -> Self {
        Self {
            label: label.into(),
            kind,
            folder: None,
            access: Access::Value { get: Box::new(get), set: Box::new(set) },
            on_change: None,
        }
    }

    /// Callback fired after every successful `set`, with the stored value
    pub fn on_change(mut self, f: impl Fn(&mut T, PropertyValue) + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }
}

impl<T> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("label", &self.label)
            .field("kind", &self.kind)
            .field("folder", &self.folder)
            .finish()
    }
}

/// Ordered set of properties, optionally grouped into folders
pub struct DebugPanel<T> {
    title: String,
    properties: Vec<Property<T>>,
    current_folder: Option<String>,
}

impl<T> DebugPanel<T> {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), properties: Vec::new(), current_folder: None }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Subsequent properties go into folder `name`
    pub fn folder(&mut self, name: impl Into<String>) -> &mut Self {
        self.current_folder = Some(name.into());
        self
    }

    /// Subsequent properties go at the top level
    pub fn end_folder(&mut self) -> &mut Self {
        self.current_folder = None;
        self
    }

    pub fn add(&mut self, mut property: Property<T>) -> &mut Self {
        property.folder = self.current_folder.clone();
        self.properties.push(property);
        self
    }

    pub fn properties(&self) -> &[Property<T>] {
        &self.properties
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Folder names in first-use order
    pub fn folders(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for name in self.properties.iter().filter_map(|p| p.folder.as_deref()) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    /// First property with `label`
    pub fn find(&self, label: &str) -> Result<&Property<T>, BindingError> {
        self.properties
            .iter()
            .find(|p| p.label == label)
            .ok_or_else(|| BindingError::UnknownLabel(label.to_string()))
    }

    pub fn get(&self, target: &T, label: &str) -> Result<PropertyValue, BindingError> {
        let property = self.find(label)?;
        match &property.access {
            Access::Value { get, .. } => Ok(get(target)),
            Access::Action(_) => Err(BindingError::TypeMismatch { label: label.to_string(), expected: "action" }),
        }
    }

    /// Validate, write through the setter and notify; returns the stored value
    pub fn set(&self, target: &mut T, label: &str, value: PropertyValue) -> Result<PropertyValue, BindingError> {
        let property = self.find(label)?;
        let Access::Value { set, .. } = &property.access else {
            return Err(BindingError::TypeMismatch { label: label.to_string(), expected: "action" });
        };

        let stored = property.kind.accept(label, value)?;
        set(target, stored);
        if let Some(on_change) = &property.on_change {
            on_change(target, stored);
        }
        Ok(stored)
    }

    /// Run an action property
    pub fn trigger(&self, target: &mut T, label: &str) -> Result<(), BindingError> {
        match &self.find(label)?.access {
            Access::Action(run) => {
                run(target);
                Ok(())
            }
            Access::Value { .. } => Err(BindingError::NotAnAction(label.to_string())),
        }
    }
}

impl<T> fmt::Debug for DebugPanel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DebugPanel")
            .field("title", &self.title)
            .field("properties", &self.properties)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Target {
        y: f32,
        color: Color,
        visible: bool,
        clicks: u32,
    }

    fn panel() -> DebugPanel<Target> {
        let mut panel = DebugPanel::new("test");
        panel
            .add(Property::number("y", -3.0, 3.0, 0.01, |t: &Target| t.y, |t, v| t.y = v))
            .add(Property::color("color", |t: &Target| t.color, |t, c| t.color = c))
            .folder("misc")
            .add(Property::toggle("visible", |t: &Target| t.visible, |t, v| t.visible = v))
            .add(Property::action("click", |t: &mut Target| t.clicks += 1));
        panel
    }

    #[test]
    fn number_is_clamped_and_snapped() {
        let panel = panel();
        let mut target = Target::default();

        let stored = panel.set(&mut target, "y", PropertyValue::Number(10.0)).unwrap();
        assert_eq!(stored, PropertyValue::Number(3.0));
        assert_eq!(target.y, 3.0);

        let stored = panel.set(&mut target, "y", PropertyValue::Number(0.123)).unwrap();
        let v = stored.as_number().unwrap();
        assert!((v - 0.12).abs() < 1e-4);
        assert_eq!(target.y, v);
    }

    #[test]
    fn wrong_type_is_rejected_and_target_untouched() {
        let panel = panel();
        let mut target = Target::default();
        let err = panel.set(&mut target, "y", PropertyValue::Bool(true)).unwrap_err();
        assert_eq!(err, BindingError::TypeMismatch { label: "y".into(), expected: "number" });
        assert_eq!(target.y, 0.0);
    }

    #[test]
    fn unknown_label_is_rejected() {
        let panel = panel();
        let mut target = Target::default();
        assert_eq!(
            panel.set(&mut target, "nope", PropertyValue::Number(1.0)),
            Err(BindingError::UnknownLabel("nope".into()))
        );
    }

    #[test]
    fn get_reads_through_getter() {
        let panel = panel();
        let target = Target { visible: true, ..Default::default() };
        assert_eq!(panel.get(&target, "visible"), Ok(PropertyValue::Bool(true)));
    }

    #[test]
    fn trigger_runs_actions_only() {
        let panel = panel();
        let mut target = Target::default();
        panel.trigger(&mut target, "click").unwrap();
        panel.trigger(&mut target, "click").unwrap();
        assert_eq!(target.clicks, 2);
        assert_eq!(panel.trigger(&mut target, "y"), Err(BindingError::NotAnAction("y".into())));
    }

    #[test]
    fn on_change_sees_stored_value() {
        let seen = Rc::new(Cell::new(f32::NAN));
        let sink = seen.clone();
        let mut panel = DebugPanel::new("t");
        panel.add(
            Property::number("y", 0.0, 1.0, 0.5, |t: &Target| t.y, |t, v| t.y = v)
                .on_change(move |_, v| sink.set(v.as_number().unwrap_or(f32::NAN))),
        );

        let mut target = Target::default();
        panel.set(&mut target, "y", PropertyValue::Number(0.7)).unwrap();
        assert_eq!(seen.get(), 0.5);
    }

    #[test]
    fn folders_group_following_properties() {
        let panel = panel();
        assert_eq!(panel.folders(), vec!["misc"]);
        assert_eq!(panel.find("y").unwrap().folder, None);
        assert_eq!(panel.find("click").unwrap().folder.as_deref(), Some("misc"));
        assert_eq!(panel.len(), 4);
    }
}
