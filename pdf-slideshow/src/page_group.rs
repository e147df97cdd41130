/// How pages are laid out on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum DisplayMode {
    /// One page per screen.
    #[default]
    Single,
    /// Two pages side by side, like an open book.
    Double,
}

impl DisplayMode {
    /// Number of page slots the viewport is divided into.
    pub fn slots(self) -> usize {
        match self {
            DisplayMode::Single => 1,
            DisplayMode::Double => 2,
        }
    }
}

/// The one or two page indices shown at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageGroup {
    Solo(usize),
    Pair(usize, usize),
}

impl PageGroup {
    pub fn first(&self) -> usize {
        match *self {
            PageGroup::Solo(page) | PageGroup::Pair(page, _) => page,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            PageGroup::Solo(_) => 1,
            PageGroup::Pair(..) => 2,
        }
    }

    pub fn to_vec(&self) -> Vec<usize> {
        match *self {
            PageGroup::Solo(page) => vec![page],
            PageGroup::Pair(left, right) => vec![left, right],
        }
    }
}

/// Number of navigable positions for a document of `page_count` pages.
pub fn position_count(page_count: usize, mode: DisplayMode) -> usize {
    match mode {
        DisplayMode::Single => page_count,
        DisplayMode::Double => page_count.div_ceil(2),
    }
}

/// Pages shown at `position`.
///
/// In double mode a trailing odd page is returned alone and occupies the
/// left slot. `position` must be below [`position_count`].
pub fn pages_for(position: usize, page_count: usize, mode: DisplayMode) -> PageGroup {
    match mode {
        DisplayMode::Single => PageGroup::Solo(position),
        DisplayMode::Double => {
            let left = position * 2;
            if left + 1 >= page_count {
                PageGroup::Solo(left)
            } else {
                PageGroup::Pair(left, left + 1)
            }
        }
    }
}
