//! Finds a single object by graphic and optional filters.
//!
//! A container search walks the container, nearer children first, and
//! returns the first object matching every filter. Any other search looks
//! at nearby mobiles first and only falls back to items when no mobile
//! matches; the result is picked at random among the matches.

use rand::seq::SliceRandom;
use rand::Rng;
use razor_client::{Item, Mobile, Serial, World};

/// Where to look
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchSource {
    /// Mobiles, then every known item outside the bank
    World,
    /// Mobiles, then items lying on the ground
    Ground,
    /// Same as `World`
    #[default]
    Any,
    Container(Serial),
}

impl SearchSource {
    /// Keyword sources; anything else is a container serial or alias
    pub fn from_keyword(text: &str) -> Option<Self> {
        match text.to_ascii_lowercase().as_str() {
            "world" => Some(SearchSource::World),
            "ground" => Some(SearchSource::Ground),
            "any" => Some(SearchSource::Any),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocateRequest {
    pub graphic: u16,
    /// `None` matches any hue
    pub color: Option<u16>,
    pub source: SearchSource,
    pub min_amount: Option<u32>,
    /// Tiles from the player
    pub max_range: Option<u32>,
}

impl LocateRequest {
    pub fn new(graphic: u16) -> Self {
        Self {
            graphic,
            color: None,
            source: SearchSource::Any,
            min_amount: None,
            max_range: None,
        }
    }

    pub fn color(mut self, color: Option<u16>) -> Self {
        self.color = color;
        self
    }

    pub fn source(mut self, source: SearchSource) -> Self {
        self.source = source;
        self
    }

    pub fn min_amount(mut self, amount: Option<u32>) -> Self {
        self.min_amount = amount;
        self
    }

    pub fn max_range(mut self, range: Option<u32>) -> Self {
        self.max_range = range;
        self
    }

    fn in_range(&self, world: &World, serial: Serial) -> bool {
        match self.max_range {
            None => true,
            Some(range) => world.distance_to(serial).is_some_and(|d| d <= range),
        }
    }

    fn matches_mobile(&self, world: &World, mobile: &Mobile) -> bool {
        mobile.body == self.graphic
            && self.color.map_or(true, |hue| mobile.hue == hue)
            && self.in_range(world, mobile.serial)
    }

    fn matches_item(&self, world: &World, item: &Item) -> bool {
        item.graphic == self.graphic
            && self.color.map_or(true, |hue| item.hue == hue)
            && self.min_amount.map_or(true, |min| item.amount >= min)
            && self.in_range(world, item.serial)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocateError {
    #[error("container {0} not found")]
    ContainerNotFound(Serial),
    #[error("{0} is not a container")]
    NotAContainer(Serial),
}

/// Run one search. `Ok(None)` means nothing matched.
pub fn locate<R: Rng + ?Sized>(
    world: &World,
    request: &LocateRequest,
    rng: &mut R,
) -> Result<Option<Serial>, LocateError> {
    if let SearchSource::Container(container) = request.source {
        return search_container(world, request, container);
    }

    // Sorted so a fixed seed always gives the same pick
    let mut mobiles: Vec<Serial> = world
        .mobiles_in_range(world.sensor_range)
        .filter(|mobile| request.matches_mobile(world, mobile))
        .map(|mobile| mobile.serial)
        .collect();
    if !mobiles.is_empty() {
        mobiles.sort_unstable();
        return Ok(mobiles.choose(rng).copied());
    }

    let ground_only = request.source == SearchSource::Ground;
    let mut items: Vec<Serial> = world
        .items()
        .filter(|item| !ground_only || item.on_ground())
        .filter(|item| request.matches_item(world, item))
        .filter(|item| !world.is_in_bank(item))
        .map(|item| item.serial)
        .collect();
    items.sort_unstable();
    Ok(items.choose(rng).copied())
}

/// Total amount of every item matching graphic, color and source. Mobiles
/// are never counted.
pub fn count(world: &World, request: &LocateRequest) -> Result<u32, LocateError> {
    let total = match request.source {
        SearchSource::Container(container) => {
            check_container(world, container)?;
            let mut total = 0u32;
            walk_container(world, container, |item| {
                if request.matches_item(world, item) {
                    total = total.saturating_add(item.amount);
                }
                false
            });
            total
        }
        source => world
            .items()
            .filter(|item| source != SearchSource::Ground || item.on_ground())
            .filter(|item| request.matches_item(world, item))
            .filter(|item| !world.is_in_bank(item))
            .fold(0u32, |total, item| total.saturating_add(item.amount)),
    };
    Ok(total)
}

/// True when `item` sits at any depth inside `container`
pub fn is_inside(world: &World, item: &Item, container: Serial) -> bool {
    let mut parent = item.container;
    for _ in 0..64 {
        match parent {
            Some(serial) if serial == container => return true,
            Some(serial) => parent = world.item(serial).and_then(|item| item.container),
            None => return false,
        }
    }
    false
}

fn check_container(world: &World, container: Serial) -> Result<(), LocateError> {
    // Mobiles hold their equipment the way containers hold items
    if world.mobile(container).is_some() {
        return Ok(());
    }
    let item = world
        .item(container)
        .ok_or(LocateError::ContainerNotFound(container))?;
    if !item.is_container {
        return Err(LocateError::NotAContainer(container));
    }
    Ok(())
}

fn search_container(
    world: &World,
    request: &LocateRequest,
    container: Serial,
) -> Result<Option<Serial>, LocateError> {
    check_container(world, container)?;
    let mut found = None;
    walk_container(world, container, |item| {
        if request.matches_item(world, item) {
            found = Some(item.serial);
            true
        } else {
            false
        }
    });
    Ok(found)
}

/// Walk everything under `container`. Each container's direct children are
/// visited before any of its sub-containers is opened; sub-containers are
/// then opened in order, each one fully before the next. Stops when `visit`
/// returns true.
fn walk_container<'w>(
    world: &'w World,
    container: Serial,
    mut visit: impl FnMut(&'w Item) -> bool,
) {
    let mut stack = vec![container];
    let mut visited = 0usize;
    while let Some(parent) = stack.pop() {
        visited += 1;
        if visited > 4096 {
            break;
        }
        let children = world.contents(parent);
        for item in children.iter().copied() {
            if visit(item) {
                return;
            }
        }
        // Reverse so the first child's subtree is searched first
        stack.extend(
            children
                .iter()
                .rev()
                .filter(|item| item.is_container)
                .map(|item| item.serial),
        );
    }
}
