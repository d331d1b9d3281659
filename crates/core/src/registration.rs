//! Registration form state machine.
//!
//! Owns every piece of state in the collection-point registration flow
//! (item catalog, UF and city selectors, map position, contact fields,
//! selected item set) and exposes one transition method per field, so
//! callers never mutate fields ad hoc.
//!
//! City lookups are asynchronous and can race when the user changes UF
//! quickly. Each [`select_uf`](RegistrationForm::select_uf) call that
//! needs a lookup returns a [`CityFetch`] carrying a generation number;
//! [`apply_cities`](RegistrationForm::apply_cities) drops any response
//! whose generation is no longer current.

use serde::{Deserialize, Serialize};

use crate::types::{Coordinate, DbId};

/// Sentinel option value for an unselected UF or city dropdown.
pub const UNSET: &str = "0";

/// One entry of the collectible item catalog as presented to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: DbId,
    pub title: String,
    pub image_url: String,
}

/// A city lookup the caller must perform after a UF selection.
///
/// `generation` identifies the selection that triggered the lookup; pass
/// it back to [`RegistrationForm::apply_cities`] with the response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityFetch {
    pub uf: String,
    pub generation: u64,
}

/// The composite payload submitted to `POST /points`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointSubmission {
    pub name: String,
    pub email: String,
    pub whatsapp: String,
    pub uf: String,
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
    pub items: Vec<DbId>,
}

/// Reasons a form cannot be assembled into a [`PointSubmission`].
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Field '{0}' is required")]
    MissingField(&'static str),

    #[error("No UF selected")]
    NoUf,

    #[error("No city selected")]
    NoCity,

    #[error("No map position selected")]
    NoPosition,

    #[error("At least one item must be selected")]
    NoItems,
}

/// All mutable state of the registration flow.
///
/// Starts empty; the caller populates the catalog and UF list from the
/// item and geography services, then feeds user input through the
/// transition methods.
#[derive(Debug, Default)]
pub struct RegistrationForm {
    items: Vec<CatalogItem>,
    ufs: Vec<String>,
    selected_uf: String,
    cities: Vec<String>,
    selected_city: String,
    position: Option<Coordinate>,
    selected_items: Vec<DbId>,
    name: String,
    email: String,
    whatsapp: String,
    city_generation: u64,
}

impl RegistrationForm {
    /// Create an empty form with both selectors on the unset sentinel.
    pub fn new() -> Self {
        Self {
            selected_uf: UNSET.to_string(),
            selected_city: UNSET.to_string(),
            ..Self::default()
        }
    }

    // -----------------------------------------------------------------------
    // Initial load
    // -----------------------------------------------------------------------

    /// Replace the item catalog (fetched once on mount).
    pub fn set_items(&mut self, items: Vec<CatalogItem>) {
        self.items = items;
    }

    /// Replace the UF list (fetched once on mount).
    pub fn set_ufs(&mut self, ufs: Vec<String>) {
        self.ufs = ufs;
    }

    // -----------------------------------------------------------------------
    // Geography selectors
    // -----------------------------------------------------------------------

    /// Record a UF selection.
    ///
    /// The city list and city selection are cleared eagerly so a list
    /// from the previous UF can never be shown alongside the new one.
    /// Returns the lookup to perform, or `None` when the sentinel was
    /// selected.
    pub fn select_uf(&mut self, uf: &str) -> Option<CityFetch> {
        self.selected_uf = uf.to_string();
        self.cities.clear();
        self.selected_city = UNSET.to_string();
        self.city_generation += 1;

        if uf == UNSET {
            return None;
        }

        Some(CityFetch {
            uf: uf.to_string(),
            generation: self.city_generation,
        })
    }

    /// Apply a city lookup response.
    ///
    /// Only the response matching the latest [`CityFetch`] generation is
    /// applied; anything older is a superseded in-flight request and is
    /// dropped. Returns whether the response was applied.
    pub fn apply_cities(&mut self, generation: u64, cities: Vec<String>) -> bool {
        if generation != self.city_generation {
            return false;
        }
        self.cities = cities;
        true
    }

    /// Record a city selection.
    pub fn select_city(&mut self, city: &str) {
        self.selected_city = city.to_string();
    }

    // -----------------------------------------------------------------------
    // Map position
    // -----------------------------------------------------------------------

    /// Record a map click. Last click wins; no history is kept.
    pub fn set_position(&mut self, latitude: f64, longitude: f64) {
        self.position = Some((latitude, longitude));
    }

    // -----------------------------------------------------------------------
    // Item selection
    // -----------------------------------------------------------------------

    /// Toggle an item id in the selection set.
    ///
    /// Removes the id if present, appends it otherwise. Insertion order
    /// is preserved but carries no meaning.
    pub fn toggle_item(&mut self, id: DbId) {
        if let Some(pos) = self.selected_items.iter().position(|&i| i == id) {
            self.selected_items.remove(pos);
        } else {
            self.selected_items.push(id);
        }
    }

    /// Whether an item id is currently selected.
    pub fn is_item_selected(&self, id: DbId) -> bool {
        self.selected_items.contains(&id)
    }

    // -----------------------------------------------------------------------
    // Contact fields
    // -----------------------------------------------------------------------

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub fn set_email(&mut self, email: &str) {
        self.email = email.to_string();
    }

    pub fn set_whatsapp(&mut self, whatsapp: &str) {
        self.whatsapp = whatsapp.to_string();
    }

    // -----------------------------------------------------------------------
    // Read accessors
    // -----------------------------------------------------------------------

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn ufs(&self) -> &[String] {
        &self.ufs
    }

    pub fn selected_uf(&self) -> &str {
        &self.selected_uf
    }

    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    pub fn selected_city(&self) -> &str {
        &self.selected_city
    }

    pub fn position(&self) -> Option<Coordinate> {
        self.position
    }

    pub fn selected_items(&self) -> &[DbId] {
        &self.selected_items
    }

    // -----------------------------------------------------------------------
    // Submission
    // -----------------------------------------------------------------------

    /// Assemble the submission payload.
    ///
    /// Fails with the first missing requirement: contact fields must be
    /// non-blank, both selectors must be off the sentinel, the map must
    /// have been clicked, and at least one item must be selected. The
    /// form itself is left untouched, so entered data survives a failed
    /// submission.
    pub fn submission(&self) -> Result<PointSubmission, FormError> {
        if self.name.trim().is_empty() {
            return Err(FormError::MissingField("name"));
        }
        if self.email.trim().is_empty() {
            return Err(FormError::MissingField("email"));
        }
        if self.whatsapp.trim().is_empty() {
            return Err(FormError::MissingField("whatsapp"));
        }
        if self.selected_uf == UNSET || self.selected_uf.is_empty() {
            return Err(FormError::NoUf);
        }
        if self.selected_city == UNSET || self.selected_city.is_empty() {
            return Err(FormError::NoCity);
        }
        let (latitude, longitude) = self.position.ok_or(FormError::NoPosition)?;
        if self.selected_items.is_empty() {
            return Err(FormError::NoItems);
        }

        Ok(PointSubmission {
            name: self.name.clone(),
            email: self.email.clone(),
            whatsapp: self.whatsapp.clone(),
            uf: self.selected_uf.clone(),
            city: self.selected_city.clone(),
            latitude,
            longitude,
            items: self.selected_items.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> RegistrationForm {
        let mut form = RegistrationForm::new();
        form.set_name("Eco Ponto A");
        form.set_email("a@eco.org");
        form.set_whatsapp("4899999999");
        form.select_uf("SC");
        form.apply_cities(1, vec!["Florianópolis".to_string()]);
        form.select_city("Florianópolis");
        form.set_position(-27.59, -48.54);
        form.toggle_item(1);
        form
    }

    // -- UF selection and city fetches --

    #[test]
    fn selecting_a_uf_requests_a_city_fetch() {
        let mut form = RegistrationForm::new();
        let fetch = form.select_uf("SC").unwrap();
        assert_eq!(fetch.uf, "SC");
        assert_eq!(form.selected_uf(), "SC");
    }

    #[test]
    fn sentinel_never_triggers_a_city_fetch() {
        let mut form = RegistrationForm::new();
        assert_eq!(form.select_uf(UNSET), None);
    }

    #[test]
    fn changing_uf_clears_cities_and_city_selection_eagerly() {
        let mut form = RegistrationForm::new();
        let fetch = form.select_uf("SC").unwrap();
        form.apply_cities(fetch.generation, vec!["Florianópolis".to_string()]);
        form.select_city("Florianópolis");

        form.select_uf("SP");
        assert!(form.cities().is_empty());
        assert_eq!(form.selected_city(), UNSET);
    }

    #[test]
    fn stale_city_response_is_dropped() {
        let mut form = RegistrationForm::new();
        let first = form.select_uf("SC").unwrap();
        let second = form.select_uf("SP").unwrap();

        // The SC response arrives after the user already picked SP.
        assert!(!form.apply_cities(first.generation, vec!["Florianópolis".to_string()]));
        assert!(form.cities().is_empty());

        assert!(form.apply_cities(second.generation, vec!["Campinas".to_string()]));
        assert_eq!(form.cities(), ["Campinas".to_string()]);
    }

    #[test]
    fn reverting_to_sentinel_invalidates_inflight_fetch() {
        let mut form = RegistrationForm::new();
        let fetch = form.select_uf("SC").unwrap();
        form.select_uf(UNSET);

        assert!(!form.apply_cities(fetch.generation, vec!["Florianópolis".to_string()]));
        assert!(form.cities().is_empty());
    }

    // -- Item toggling --

    #[test]
    fn toggle_adds_then_removes() {
        let mut form = RegistrationForm::new();
        form.toggle_item(1);
        assert!(form.is_item_selected(1));
        form.toggle_item(1);
        assert!(!form.is_item_selected(1));
    }

    #[test]
    fn toggle_preserves_insertion_order_of_others() {
        let mut form = RegistrationForm::new();
        form.toggle_item(3);
        form.toggle_item(1);
        form.toggle_item(2);
        form.toggle_item(1);
        assert_eq!(form.selected_items(), [3, 2]);
    }

    // -- Map position --

    #[test]
    fn last_map_click_wins() {
        let mut form = RegistrationForm::new();
        form.set_position(-27.59, -48.54);
        form.set_position(-23.55, -46.63);
        assert_eq!(form.position(), Some((-23.55, -46.63)));
    }

    // -- Submission --

    #[test]
    fn complete_form_submits() {
        let form = filled_form();
        let payload = form.submission().unwrap();
        assert_eq!(payload.name, "Eco Ponto A");
        assert_eq!(payload.uf, "SC");
        assert_eq!(payload.city, "Florianópolis");
        assert_eq!(payload.latitude, -27.59);
        assert_eq!(payload.longitude, -48.54);
        assert_eq!(payload.items, [1]);
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut form = filled_form();
        form.set_name("   ");
        assert_eq!(form.submission(), Err(FormError::MissingField("name")));
    }

    #[test]
    fn unset_city_is_rejected() {
        let mut form = filled_form();
        form.select_city(UNSET);
        assert_eq!(form.submission(), Err(FormError::NoCity));
    }

    #[test]
    fn missing_position_is_rejected() {
        let mut form = RegistrationForm::new();
        form.set_name("Eco Ponto A");
        form.set_email("a@eco.org");
        form.set_whatsapp("4899999999");
        form.select_uf("SC");
        form.apply_cities(1, vec!["Florianópolis".to_string()]);
        form.select_city("Florianópolis");
        form.toggle_item(1);
        assert_eq!(form.submission(), Err(FormError::NoPosition));
    }

    #[test]
    fn empty_item_set_is_rejected() {
        let mut form = filled_form();
        form.toggle_item(1);
        assert_eq!(form.submission(), Err(FormError::NoItems));
    }

    #[test]
    fn failed_submission_keeps_entered_data() {
        let mut form = filled_form();
        form.toggle_item(1);
        let _ = form.submission();
        assert_eq!(form.selected_uf(), "SC");
        assert_eq!(form.selected_city(), "Florianópolis");
        assert_eq!(form.position(), Some((-27.59, -48.54)));
    }
}
