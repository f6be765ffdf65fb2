//! The page the loader draws on.

use std::sync::Arc;

use treeloader_core::{LoadMode, ModParams};
use treeloader_platform::{MaybeSend, MaybeSync};

/// Regions of the host page the loader toggles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    /// Shown while a mod loads.
    Loading,
    /// The mod's own content.
    App,
    /// Failure text.
    Error,
    /// The form for choosing another mod.
    Selector,
}

impl Region {
    pub const ALL: [Self; 4] = [Self::Loading, Self::App, Self::Error, Self::Selector];

    /// Element id in the host document.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Loading => "loadingSection",
            Self::App => "app",
            Self::Error => "errorSection",
            Self::Selector => "selectorSection",
        }
    }
}

/// Inputs of the selector form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Owner,
    Repository,
    Branch,
    /// Checkbox; checked means discovered mode.
    Mode,
}

impl Field {
    pub const ALL: [Self; 4] = [Self::Owner, Self::Repository, Self::Branch, Self::Mode];

    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Owner => "userInput",
            Self::Repository => "repoInput",
            Self::Branch => "branchInput",
            Self::Mode => "fullModeInput",
        }
    }
}

/// Write access to the host page.
///
/// Implementations ignore regions or fields the page does not have.
#[cfg_attr(test, unimock::unimock(api = RenderSurfaceMock))]
pub trait RenderSurface: MaybeSend + MaybeSync {
    fn show(&self, region: Region);
    fn hide(&self, region: Region);
    fn set_text(&self, region: Region, text: &str);
    /// Replace the inner markup of `region`.
    fn replace_content(&self, region: Region, markup: &str);
    fn read_text(&self, field: Field) -> String;
    fn write_text(&self, field: Field, value: &str);
    fn read_flag(&self, field: Field) -> bool;
    fn write_flag(&self, field: Field, value: bool);
}

impl<S: RenderSurface + ?Sized> RenderSurface for &S {
    fn show(&self, region: Region) {
        (**self).show(region);
    }

    fn hide(&self, region: Region) {
        (**self).hide(region);
    }

    fn set_text(&self, region: Region, text: &str) {
        (**self).set_text(region, text);
    }

    fn replace_content(&self, region: Region, markup: &str) {
        (**self).replace_content(region, markup);
    }

    fn read_text(&self, field: Field) -> String {
        (**self).read_text(field)
    }

    fn write_text(&self, field: Field, value: &str) {
        (**self).write_text(field, value);
    }

    fn read_flag(&self, field: Field) -> bool {
        (**self).read_flag(field)
    }

    fn write_flag(&self, field: Field, value: bool) {
        (**self).write_flag(field, value);
    }
}

impl<S: RenderSurface + ?Sized> RenderSurface for Arc<S> {
    fn show(&self, region: Region) {
        (**self).show(region);
    }

    fn hide(&self, region: Region) {
        (**self).hide(region);
    }

    fn set_text(&self, region: Region, text: &str) {
        (**self).set_text(region, text);
    }

    fn replace_content(&self, region: Region, markup: &str) {
        (**self).replace_content(region, markup);
    }

    fn read_text(&self, field: Field) -> String {
        (**self).read_text(field)
    }

    fn write_text(&self, field: Field, value: &str) {
        (**self).write_text(field, value);
    }

    fn read_flag(&self, field: Field) -> bool {
        (**self).read_flag(field)
    }

    fn write_flag(&self, field: Field, value: bool) {
        (**self).write_flag(field, value);
    }
}

/// Fill the selector form with `params`.
pub fn write_params<S: RenderSurface + ?Sized>(surface: &S, params: &ModParams) {
    surface.write_text(Field::Owner, &params.owner);
    surface.write_text(Field::Repository, &params.repository);
    surface.write_text(Field::Branch, &params.branch);
    surface.write_flag(Field::Mode, params.mode.is_discovered());
}

/// Read the selector form back. Values are taken as typed; defaults are not
/// applied.
pub fn read_params<S: RenderSurface + ?Sized>(surface: &S) -> ModParams {
    ModParams {
        owner: surface.read_text(Field::Owner),
        repository: surface.read_text(Field::Repository),
        branch: surface.read_text(Field::Branch),
        mode: LoadMode::from_flag(surface.read_flag(Field::Mode)),
    }
}
