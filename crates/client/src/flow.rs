//! Drives the registration form against the live services.
//!
//! The flow owns a [`RegistrationForm`] plus the two HTTP clients. All
//! decision logic stays in the form; this module only performs the
//! network calls the form's transitions ask for, so everything
//! interesting is testable without a server.

use ecoleta_core::registration::{FormError, RegistrationForm};
use ecoleta_geo::{GeoClient, GeoError};

use crate::api::{ApiClient, ApiError, PointRecord};

/// Errors from the registration flow.
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    /// The form is incomplete; entered data is kept intact.
    #[error(transparent)]
    Form(#[from] FormError),

    /// The geography lookup failed.
    #[error(transparent)]
    Geo(#[from] GeoError),

    /// The registration API call failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// One user's registration session.
pub struct RegistrationFlow {
    form: RegistrationForm,
    api: ApiClient,
    geo: GeoClient,
}

impl RegistrationFlow {
    pub fn new(api: ApiClient, geo: GeoClient) -> Self {
        Self {
            form: RegistrationForm::new(),
            api,
            geo,
        }
    }

    /// Initial load: fetch the item catalog and the UF list.
    ///
    /// The two calls are independent and issued concurrently; neither
    /// depends on the other's result.
    pub async fn start(&mut self) -> Result<(), FlowError> {
        let (items, ufs) = tokio::join!(self.api.list_items(), self.geo.list_ufs());
        self.form.set_items(items?);
        self.form.set_ufs(ufs?);
        Ok(())
    }

    /// Handle a UF selection, fetching the city list when one is needed.
    ///
    /// The form hands back a generation-tagged fetch request; the
    /// response is only applied if no newer selection supersedes it.
    pub async fn select_uf(&mut self, uf: &str) -> Result<(), FlowError> {
        let Some(fetch) = self.form.select_uf(uf) else {
            return Ok(());
        };

        let cities = self.geo.list_cities(&fetch.uf).await?;
        self.form.apply_cities(fetch.generation, cities);
        Ok(())
    }

    /// Validate the form and submit it to the registration API.
    ///
    /// On any failure the form keeps all entered state, so the user can
    /// correct and retry.
    pub async fn submit(&mut self) -> Result<PointRecord, FlowError> {
        let submission = self.form.submission()?;
        let created = self.api.create_point(&submission).await?;
        Ok(created)
    }

    /// The underlying form, for the pure per-field transitions
    /// (city/position/item/contact fields) and for rendering.
    pub fn form(&self) -> &RegistrationForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut RegistrationForm {
        &mut self.form
    }
}
