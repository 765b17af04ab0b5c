//! Ready-made queries for each screen.
//!
//! Each constructor binds one `GeoApi` call to a `QueryController` whose
//! dependency value holds the call's parameters. Queries about a user take
//! the user id explicitly; the caller decides which id is the default.
//! Controllers start idle: call `activate()` to run the first fetch.

use crate::api::{FeatureFilter, GeoApi, MistakeFilter, TriviaPage};
use crate::query::QueryController;
use crate::types::{
    ArLandform, DailyTrivia, GeographicFeature, LandformType, Level, MasteryLevel, Mistake,
    MistakeCategory, User, UserLevelProgress, UserProgress,
};

pub fn user(api: &GeoApi, user_id: impl Into<String>) -> QueryController<String, User> {
    let api = api.clone();
    QueryController::new(user_id.into(), move |id: String| {
        let api = api.clone();
        async move { api.users().get_user(&id).await }
    })
}

pub fn user_progress(api: &GeoApi, user_id: impl Into<String>) -> QueryController<String, UserProgress> {
    let api = api.clone();
    QueryController::new(user_id.into(), move |id: String| {
        let api = api.clone();
        async move { api.users().get_user_progress(&id).await }
    })
}

pub fn today_trivia(api: &GeoApi) -> QueryController<(), DailyTrivia> {
    let api = api.clone();
    QueryController::new((), move |()| {
        let api = api.clone();
        async move { api.trivia().get_today_trivia().await }
    })
}

pub fn all_trivia(api: &GeoApi, page: TriviaPage) -> QueryController<TriviaPage, Vec<DailyTrivia>> {
    let api = api.clone();
    QueryController::new(page, move |page| {
        let api = api.clone();
        async move { api.trivia().list_trivia(page).await }
    })
}

pub fn levels(api: &GeoApi) -> QueryController<(), Vec<Level>> {
    let api = api.clone();
    QueryController::new((), move |()| {
        let api = api.clone();
        async move { api.levels().list_levels().await }
    })
}

pub fn user_level_progress(
    api: &GeoApi,
    user_id: impl Into<String>,
) -> QueryController<String, Vec<UserLevelProgress>> {
    let api = api.clone();
    QueryController::new(user_id.into(), move |id: String| {
        let api = api.clone();
        async move { api.levels().get_user_level_progress(&id).await }
    })
}

/// Mistakes of one user, optionally narrowed by category and mastery.
///
/// Change the filter with `set_deps(ctrl.deps().category(...))`.
pub fn mistakes(
    api: &GeoApi,
    user_id: impl Into<String>,
    category: Option<MistakeCategory>,
    mastery_level: Option<MasteryLevel>,
) -> QueryController<MistakeFilter, Vec<Mistake>> {
    mistakes_matching(
        api,
        MistakeFilter {
            category,
            mastery_level,
            ..MistakeFilter::for_user(user_id)
        },
    )
}

/// Mistakes matching an arbitrary filter, including across all users.
pub fn mistakes_matching(api: &GeoApi, filter: MistakeFilter) -> QueryController<MistakeFilter, Vec<Mistake>> {
    let api = api.clone();
    QueryController::new(filter, move |filter: MistakeFilter| {
        let api = api.clone();
        async move { api.mistakes().list_mistakes(&filter).await }
    })
}

pub fn geo_features(api: &GeoApi, filter: FeatureFilter) -> QueryController<FeatureFilter, Vec<GeographicFeature>> {
    let api = api.clone();
    QueryController::new(filter, move |filter: FeatureFilter| {
        let api = api.clone();
        async move { api.geo_features().list_features(&filter).await }
    })
}

pub fn ar_landforms(
    api: &GeoApi,
    landform_type: Option<LandformType>,
) -> QueryController<Option<LandformType>, Vec<ArLandform>> {
    let api = api.clone();
    QueryController::new(landform_type, move |landform_type| {
        let api = api.clone();
        async move { api.ar_landforms().list_landforms(landform_type).await }
    })
}
