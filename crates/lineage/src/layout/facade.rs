//! Memoised layout bound to an observed root and viewport width.

use std::{
    cell::{Cell, OnceCell},
    rc::Rc,
};

use log::debug;

use lineage_core::{
    diagram::{Link, Node},
    family::Person,
};

use super::{Engine, TreeLayout};

/// Keeps the layout of the current root in sync with its inputs.
///
/// The layout is recomputed from scratch, lazily, the first time it is read
/// after the root reference or the viewport width changed. Setting the same
/// root again (the same `Rc`) or the same width keeps the cached layout.
///
/// # Examples
///
/// ```
/// # use std::rc::Rc;
/// # use lineage::layout::{Engine, LayoutFacade};
/// # use lineage::family::Person;
/// let mut facade = LayoutFacade::new(Engine::new());
/// assert!(facade.nodes().is_empty());
///
/// facade.set_root(Some(Rc::new(Person::new(1, "Olena"))));
/// facade.set_viewport_width(800.0);
/// assert_eq!(facade.nodes()[0].x(), 400.0);
/// ```
#[derive(Debug)]
pub struct LayoutFacade {
    engine: Engine,
    root: Option<Rc<Person>>,
    viewport_width: f32,
    layout: OnceCell<TreeLayout>,
    recomputations: Cell<usize>,
}

impl LayoutFacade {
    /// Creates a facade with no root and a zero viewport width.
    pub fn new(engine: Engine) -> Self {
        Self {
            engine,
            root: None,
            viewport_width: 0.0,
            layout: OnceCell::new(),
            recomputations: Cell::new(0),
        }
    }

    pub fn root(&self) -> Option<&Rc<Person>> {
        self.root.as_ref()
    }

    pub fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    /// Observes a new root. The layout is invalidated only if the reference changed.
    pub fn set_root(&mut self, root: Option<Rc<Person>>) {
        let unchanged = match (&self.root, &root) {
            (Some(current), Some(new)) => Rc::ptr_eq(current, new),
            (None, None) => true,
            _ => false,
        };
        if !unchanged {
            self.root = root;
            self.invalidate();
        }
    }

    /// Observes a new viewport width. The layout is invalidated only if it changed.
    pub fn set_viewport_width(&mut self, width: f32) {
        if width != self.viewport_width {
            self.viewport_width = width;
            self.invalidate();
        }
    }

    /// Returns the current layout, computing it if the inputs changed.
    pub fn layout(&self) -> &TreeLayout {
        self.layout.get_or_init(|| {
            self.recomputations.set(self.recomputations.get() + 1);
            debug!(viewport_width = self.viewport_width; "Recomputing layout");
            match &self.root {
                Some(root) => self.engine.layout(root, self.viewport_width),
                None => TreeLayout::default(),
            }
        })
    }

    pub fn nodes(&self) -> &[Node] {
        self.layout().nodes()
    }

    pub fn links(&self) -> &[Link] {
        self.layout().links()
    }

    /// How many times the layout was computed so far.
    pub fn recompute_count(&self) -> usize {
        self.recomputations.get()
    }

    fn invalidate(&mut self) {
        self.layout.take();
    }
}
