#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! In-memory registry of placed city objects.
//!
//! Objects are kept in insertion order. At most one object is selected at a
//! time; move and delete operate on the selection. The registry is owned by
//! a single session and has no internal synchronization.

use citytwin_object_models::{CityObject, Coordinate, ObjectKind};

/// Length of generated object identifiers, in hex characters.
const ID_LEN: usize = 10;

/// Errors that can occur when addressing registry objects by id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// No object with the given id exists.
    #[error("Unknown object: {id}")]
    UnknownObject {
        /// The id that was looked up.
        id: String,
    },
}

/// Ordered collection of placed objects plus the current selection.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    objects: Vec<CityObject>,
    selected: Option<String>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            objects: Vec::new(),
            selected: None,
        }
    }

    /// Places a new object with its kind's default parameters and selects it.
    pub fn add(&mut self, kind: ObjectKind, coordinate: Coordinate) -> &CityObject {
        let id = self.fresh_id();
        log::debug!("Adding {kind} {id} at {coordinate}");

        self.objects.push(CityObject::new(id.clone(), kind, coordinate));
        self.selected = Some(id);

        let last = self.objects.len() - 1;
        &self.objects[last]
    }

    /// Removes the selected object.
    ///
    /// Afterwards the first remaining object is selected, or the selection
    /// is cleared if the registry is empty. Returns `false` if nothing was
    /// selected.
    pub fn delete_selected(&mut self) -> bool {
        let Some(id) = self.selected.take() else {
            return false;
        };

        let before = self.objects.len();
        self.objects.retain(|o| o.id != id);
        let removed = self.objects.len() < before;

        self.selected = self.objects.first().map(|o| o.id.clone());

        if removed {
            log::debug!("Deleted {id}");
        } else {
            log::warn!("Selected object {id} was not in the registry");
        }
        removed
    }

    /// Moves the selected object to `coordinate`.
    ///
    /// Returns `false` if nothing is selected.
    pub fn move_selected(&mut self, coordinate: Coordinate) -> bool {
        let Some(id) = self.selected.as_deref() else {
            return false;
        };

        match self.objects.iter_mut().find(|o| o.id == id) {
            Some(obj) => {
                log::debug!("Moving {id} from {} to {coordinate}", obj.coordinate);
                obj.coordinate = coordinate;
                true
            }
            None => false,
        }
    }

    /// Returns the selected object, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&CityObject> {
        let id = self.selected.as_deref()?;
        self.get(id)
    }

    /// Returns the selected object's id, if any.
    #[must_use]
    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Selects an existing object by id.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownObject`] if no object has that id.
    /// The selection is left unchanged in that case.
    pub fn select(&mut self, id: &str) -> Result<(), RegistryError> {
        if self.get(id).is_none() {
            return Err(RegistryError::UnknownObject { id: id.to_string() });
        }
        self.selected = Some(id.to_string());
        Ok(())
    }

    /// Looks up an object by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CityObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    /// All objects in insertion order.
    #[must_use]
    pub fn objects(&self) -> &[CityObject] {
        &self.objects
    }

    /// Every object except the one with the given id.
    pub fn others<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a CityObject> + 'a {
        self.objects.iter().filter(move |o| o.id != id)
    }

    /// Number of placed objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether no objects have been placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    fn fresh_id(&self) -> String {
        loop {
            let mut id = uuid::Uuid::new_v4().simple().to_string();
            id.truncate(ID_LEN);
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    #[test]
    fn add_selects_newest_object() {
        let mut registry = Registry::new();
        let first = registry.add(ObjectKind::Housing, c(1.0, 1.0)).id.clone();
        let second = registry.add(ObjectKind::School, c(2.0, 2.0)).id.clone();

        assert_ne!(first, second);
        assert_eq!(second.len(), ID_LEN);
        assert_eq!(registry.selected_id(), Some(second.as_str()));
        assert_eq!(registry.selected().unwrap().kind(), ObjectKind::School);
        assert_eq!(registry.objects()[0].id, first);
    }

    #[test]
    fn delete_without_selection_is_noop() {
        let mut registry = Registry::new();
        assert!(!registry.delete_selected());
        assert!(registry.is_empty());
    }

    #[test]
    fn delete_reselects_first_remaining() {
        let mut registry = Registry::new();
        let a = registry.add(ObjectKind::Housing, c(1.0, 1.0)).id.clone();
        registry.add(ObjectKind::Park, c(2.0, 2.0));
        let cid = registry.add(ObjectKind::School, c(3.0, 3.0)).id.clone();

        assert!(registry.delete_selected());
        assert_eq!(registry.len(), 2);
        assert!(registry.get(&cid).is_none());
        assert_eq!(registry.selected_id(), Some(a.as_str()));
    }

    #[test]
    fn delete_last_object_clears_selection() {
        let mut registry = Registry::new();
        registry.add(ObjectKind::Bridge, c(1.0, 1.0));

        assert!(registry.delete_selected());
        assert!(registry.is_empty());
        assert!(registry.selected().is_none());
        assert!(!registry.delete_selected());
    }

    #[test]
    fn move_updates_selected_in_place() {
        let mut registry = Registry::new();
        let id = registry.add(ObjectKind::Park, c(1.0, 1.0)).id.clone();

        assert!(registry.move_selected(c(5.0, 6.0)));
        let moved = registry.get(&id).unwrap();
        assert_eq!(moved.coordinate, c(5.0, 6.0));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn move_without_selection_returns_false() {
        let mut registry = Registry::new();
        assert!(!registry.move_selected(c(5.0, 6.0)));
    }

    #[test]
    fn select_unknown_keeps_selection() {
        let mut registry = Registry::new();
        let id = registry.add(ObjectKind::Park, c(1.0, 1.0)).id.clone();

        let err = registry.select("missing").unwrap_err();
        assert_eq!(
            err,
            RegistryError::UnknownObject {
                id: "missing".to_string()
            }
        );
        assert_eq!(registry.selected_id(), Some(id.as_str()));
    }

    #[test]
    fn others_excludes_given_object() {
        let mut registry = Registry::new();
        let a = registry.add(ObjectKind::Housing, c(1.0, 1.0)).id.clone();
        let b = registry.add(ObjectKind::School, c(2.0, 2.0)).id.clone();

        let rest: Vec<&str> = registry.others(&a).map(|o| o.id.as_str()).collect();
        assert_eq!(rest, vec![b.as_str()]);
    }
}
