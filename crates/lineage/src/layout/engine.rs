//! The recursive layout orchestrator.

use log::{debug, info, trace};

use lineage_core::{
    diagram::{Link, Node, NodeId},
    family::Person,
    geometry::Point,
};

use crate::config::LayoutConfig;

use super::{TreeLayout, links, nodes, positioning, width};

/// Lays out family trees with a fixed [`LayoutConfig`].
///
/// The engine holds no state besides its configuration; every call builds
/// a fresh layout, so calling it twice with the same tree yields identical
/// coordinates.
///
/// # Examples
///
/// ```
/// # use lineage::layout::Engine;
/// # use lineage::family::Person;
/// let root = Person::new(1, "Olena").with_husband(Person::new(2, "Taras"));
/// let layout = Engine::new().layout(&root, 800.0);
///
/// let xs: Vec<f32> = layout.nodes().iter().map(|node| node.x()).collect();
/// assert_eq!(xs, vec![285.0, 515.0, 400.0]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Engine {
    config: LayoutConfig,
}

impl Engine {
    /// Creates an engine with the default layout configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &LayoutConfig) -> Self {
        Self { config: *config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Lays out the whole tree below `root`, centered in a viewport of the
    /// given width.
    ///
    /// A root without an id, or with id 0, is treated as "not loaded yet"
    /// and produces an empty layout.
    pub fn layout(&self, root: &Person, viewport_width: f32) -> TreeLayout {
        if root.id().is_none_or(|id| id.value() == 0) {
            debug!(id:? = root.id(); "Root person is not loaded, skipping layout");
            return TreeLayout::default();
        }

        info!(viewport_width, people = root.descendant_count(); "Laying out family tree");
        let center = Point::new(viewport_width / 2.0, self.config.root_y());
        let layout = self
            .layout_tree(root, root.partner(), center)
            .into_tree_layout(&self.config);
        debug!(nodes = layout.nodes().len(), links = layout.links().len(); "Layout calculated");

        layout
    }

    /// Lays out `person`, their `partner` and all of their descendants.
    ///
    /// `center` is where the pair midpoint (or the person, when unpartnered)
    /// goes. A partner without a name counts as no partner. The partner's own
    /// children are never visited.
    pub fn layout_tree(
        &self,
        person: &Person,
        partner: Option<&Person>,
        center: Point,
    ) -> SubtreeLayout {
        let config = &self.config;
        let partner = partner.filter(|partner| partner.has_name());
        let (children, row_width) = self.layout_children(person, center);

        let box_width = config.box_width();
        let partner_width = if partner.is_some() { box_width } else { 0.0 };
        let local_pair_gap = nodes::local_pair_gap(partner_width, config);
        let half_gap = local_pair_gap / 2.0;

        let self_block_width = box_width + partner_width + local_pair_gap;
        let block_width = match partner {
            Some(_) => box_width + partner_width + config.pair_gap(),
            None => box_width,
        };

        let (min_x, max_x) = if children.is_empty() {
            (
                center.x() - half_gap - box_width / 2.0,
                center.x() + half_gap + box_width / 2.0,
            )
        } else {
            children
                .iter()
                .fold((f32::INFINITY, f32::NEG_INFINITY), |(min_x, max_x), child| {
                    (min_x.min(child.min_x), max_x.max(child.max_x))
                })
        };
        let subtree_width = self_block_width.max(row_width);

        trace!(
            person:? = person.id(),
            has_partner = partner.is_some(),
            children = children.len(),
            subtree_width,
            min_x,
            max_x;
            "Generation laid out"
        );

        let mut nodes = nodes::generation_nodes(person, partner, center, config);
        let mut links = links::generation_links(person, partner, center, &children, config);
        for child in children {
            nodes.extend(child.nodes);
            links.extend(child.links);
        }

        SubtreeLayout {
            self_id: NodeId::Person(person.id()),
            self_position: center.translate_x(-half_gap),
            anchor: center,
            partner_width,
            block_width,
            nodes,
            links,
            min_x,
            max_x,
            subtree_width,
        }
    }

    /// Lays out the children of `person` one generation below `center` and
    /// places them under `center.x()`.
    ///
    /// Returns the placed subtrees and the total width of their row.
    pub(super) fn layout_children(
        &self,
        person: &Person,
        center: Point,
    ) -> (Vec<SubtreeLayout>, f32) {
        let child_center = Point::new(0.0, center.y() + self.config.vertical_gap());
        let children: Vec<SubtreeLayout> = person
            .children()
            .iter()
            .map(|child| self.layout_tree(child, child.partner(), child_center))
            .collect();

        let widths = width::reserved_widths(&children, &self.config);
        let row_width = width::row_width(&widths, self.config.min_child_gap());
        let children = positioning::position_children(children, &widths, center.x(), &self.config);

        (children, row_width)
    }
}

/// The layout of one person and everything below them.
///
/// Produced bottom-up by [`Engine::layout_tree`]. A subtree owns its nodes
/// and links; moving it into place maps them into new collections.
#[derive(Debug, Clone)]
pub struct SubtreeLayout {
    self_id: NodeId,
    self_position: Point,
    anchor: Point,
    partner_width: f32,
    block_width: f32,
    nodes: Vec<Node>,
    links: Vec<Link>,
    min_x: f32,
    max_x: f32,
    subtree_width: f32,
}

impl SubtreeLayout {
    /// Id of the person this subtree is rooted at.
    pub fn self_id(&self) -> NodeId {
        self.self_id
    }

    /// Position of the person's own node.
    pub fn self_position(&self) -> Point {
        self.self_position
    }

    /// Pair midpoint, or the person's position when unpartnered. Children
    /// are centered under it.
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    /// Width of the partner box, zero without a (named) partner.
    pub fn partner_width(&self) -> f32 {
        self.partner_width
    }

    pub fn has_partner(&self) -> bool {
        self.partner_width > 0.0
    }

    /// Width of the person and partner boxes plus the gap between them.
    pub fn block_width(&self) -> f32 {
        self.block_width
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn min_x(&self) -> f32 {
        self.min_x
    }

    pub fn max_x(&self) -> f32 {
        self.max_x
    }

    /// Horizontal space the subtree needs so siblings never collide.
    pub fn subtree_width(&self) -> f32 {
        self.subtree_width
    }

    /// Returns the subtree moved horizontally by `dx`.
    pub fn translated(self, dx: f32) -> Self {
        Self {
            self_position: self.self_position.translate_x(dx),
            anchor: self.anchor.translate_x(dx),
            nodes: self
                .nodes
                .into_iter()
                .map(|node| node.translated(dx))
                .collect(),
            links: self
                .links
                .into_iter()
                .map(|link| link.translated(dx))
                .collect(),
            min_x: self.min_x + dx,
            max_x: self.max_x + dx,
            ..self
        }
    }

    /// Finishes the layout, dropping the per-level bookkeeping.
    pub fn into_tree_layout(self, config: &LayoutConfig) -> TreeLayout {
        TreeLayout::new(self.nodes, self.links, config.box_height())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use float_cmp::assert_approx_eq;
    use proptest::prelude::*;

    use lineage_core::diagram::NodeKind;

    use super::*;

    fn layout(root: &Person) -> TreeLayout {
        Engine::default().layout(root, 800.0)
    }

    fn node_xy(layout: &TreeLayout) -> Vec<(String, f32, f32)> {
        layout
            .nodes()
            .iter()
            .map(|node| (node.id().to_string(), node.x(), node.y()))
            .collect()
    }

    #[test]
    fn test_single_person() {
        let layout = layout(&Person::new(1, "A"));

        assert_eq!(node_xy(&layout), vec![("1".to_string(), 400.0, 180.0)]);
        assert!(layout.links().is_empty());
    }

    #[test]
    fn test_partnered_person() {
        let layout = layout(&Person::new(1, "A").with_wife(Person::new(2, "B")));

        assert_eq!(
            node_xy(&layout),
            vec![
                ("1".to_string(), 285.0, 180.0),
                ("2".to_string(), 515.0, 180.0),
                ("1_2_marriage".to_string(), 400.0, 180.0),
            ]
        );
        assert_eq!(layout.links().len(), 2);
        assert!(
            layout
                .links()
                .iter()
                .all(|link| link.direction() == "marriage")
        );
    }

    #[test]
    fn test_unpartnered_person_with_two_children() {
        let root = Person::new(1, "A").with_children([Person::new(2, "B"), Person::new(3, "C")]);
        let layout = layout(&root);

        assert_eq!(
            node_xy(&layout),
            vec![
                ("1".to_string(), 400.0, 180.0),
                ("2".to_string(), 285.0, 320.0),
                ("3".to_string(), 515.0, 320.0),
            ]
        );

        let directions: Vec<_> = layout.links().iter().map(Link::direction).collect();
        assert_eq!(
            directions,
            vec![
                "marriageToPlatform",
                "platform",
                "platformToChild",
                "platformToChild"
            ]
        );
        assert_eq!(
            layout.links()[1],
            Link::Platform {
                x1: 285.0,
                x2: 515.0,
                y: 250.0
            }
        );
    }

    #[test]
    fn test_partnered_person_with_one_partnered_child() {
        let root = Person::new(1, "A")
            .with_wife(Person::new(2, "B"))
            .with_child(Person::new(3, "C").with_husband(Person::new(4, "D")));
        let layout = layout(&root);

        assert_eq!(
            node_xy(&layout),
            vec![
                ("1".to_string(), 285.0, 180.0),
                ("2".to_string(), 515.0, 180.0),
                ("1_2_marriage".to_string(), 400.0, 180.0),
                ("3".to_string(), 285.0, 320.0),
                ("4".to_string(), 515.0, 320.0),
                ("3_4_marriage".to_string(), 400.0, 320.0),
            ]
        );

        let junction = NodeId::Marriage {
            person: Some(1.into()),
            partner: Some(2.into()),
        };
        assert_eq!(
            layout.links()[2],
            Link::MarriageToPlatform {
                from: junction,
                x: 400.0,
                y1: 180.0,
                y2: 250.0
            }
        );
        // 170 + 170 + 60 + 60 = 460 wide, centered on the child's pair midpoint.
        assert_eq!(
            layout.links()[3],
            Link::Platform {
                x1: 170.0,
                x2: 630.0,
                y: 250.0
            }
        );
        assert_eq!(layout.links().len(), 7);
    }

    #[test]
    fn test_root_without_id_is_empty() {
        let root = Person::default()
            .with_name(Some("Unknown".to_string()))
            .with_child(Person::new(2, "B"));
        assert!(layout(&root).is_empty());
    }

    #[test]
    fn test_root_with_zero_id_is_empty() {
        let root = Person::new(0, "A").with_child(Person::new(2, "B"));
        assert!(layout(&root).is_empty());

        // Only the root is checked; descendants with id 0 are laid out.
        let root = Person::new(1, "A").with_child(Person::new(0, "B"));
        assert_eq!(layout(&root).nodes().len(), 2);
    }

    #[test]
    fn test_unnamed_partner_is_ignored() {
        let root = Person::new(1, "A").with_husband(Person::new(2, ""));
        let layout = layout(&root);

        assert_eq!(node_xy(&layout), vec![("1".to_string(), 400.0, 180.0)]);
        assert!(layout.links().is_empty());
    }

    #[test]
    fn test_partner_children_are_not_visited() {
        let wife = Person::new(2, "B").with_child(Person::new(9, "Stepchild"));
        let layout = layout(&Person::new(1, "A").with_wife(wife));

        assert_eq!(layout.nodes().len(), 3);
    }

    #[test]
    fn test_person_fields_travel_to_node() {
        let root = Person::new(1, "A").with_field("born", 1921);
        let layout = layout(&root);

        let NodeKind::Person { record, width } = layout.nodes()[0].kind() else {
            panic!("expected a person node");
        };
        assert_approx_eq!(f32, *width, 170.0);
        assert_eq!(record.extra()["born"], 1921);
    }

    #[test]
    fn test_leaf_bounds() {
        let engine = Engine::default();
        let center = Point::new(400.0, 180.0);

        let single = engine.layout_tree(&Person::new(1, "A"), None, center);
        assert_approx_eq!(f32, single.min_x(), 315.0);
        assert_approx_eq!(f32, single.max_x(), 485.0);
        assert_approx_eq!(f32, single.subtree_width(), 170.0);
        assert_approx_eq!(f32, single.block_width(), 170.0);

        let partner = Person::new(2, "B");
        let pair = engine.layout_tree(&Person::new(1, "A"), Some(&partner), center);
        assert_approx_eq!(f32, pair.min_x(), 200.0);
        assert_approx_eq!(f32, pair.max_x(), 600.0);
        assert_approx_eq!(f32, pair.subtree_width(), 570.0);
        assert_approx_eq!(f32, pair.block_width(), 400.0);
        assert_approx_eq!(f32, pair.self_position().x(), 285.0);
    }

    #[test]
    fn test_custom_config() {
        let config = LayoutConfig::default()
            .with_box_width(100.0)
            .with_vertical_gap(200.0)
            .with_root_y(0.0);
        let root = Person::new(1, "A").with_children([Person::new(2, "B"), Person::new(3, "C")]);
        let layout = Engine::from_config(&config).layout(&root, 1000.0);

        // Row of 100 + 60 + 100 centered on 500.
        assert_eq!(
            node_xy(&layout),
            vec![
                ("1".to_string(), 500.0, 0.0),
                ("2".to_string(), 420.0, 200.0),
                ("3".to_string(), 580.0, 200.0),
            ]
        );
    }

    // ===================
    // Generated trees
    // ===================

    /// Shape of a generated tree: `partner` is `Some(named)` for a recorded wife.
    #[derive(Debug, Clone)]
    struct Shape {
        partner: Option<bool>,
        children: Vec<Shape>,
    }

    fn shape_strategy() -> impl Strategy<Value = Shape> {
        let leaf = proptest::option::of(any::<bool>()).prop_map(|partner| Shape {
            partner,
            children: Vec::new(),
        });
        leaf.prop_recursive(4, 40, 4, |inner| {
            (
                proptest::option::of(any::<bool>()),
                prop::collection::vec(inner, 0..5),
            )
                .prop_map(|(partner, children)| Shape { partner, children })
        })
    }

    fn build(shape: &Shape, next_id: &mut u64) -> Person {
        *next_id += 1;
        let mut person = Person::new(*next_id, format!("Person {next_id}"));
        if let Some(named) = shape.partner {
            *next_id += 1;
            let name = if named { "Partner" } else { "" };
            person = person.with_wife(Person::new(*next_id, name));
        }
        let children: Vec<Person> = shape
            .children
            .iter()
            .map(|child| build(child, next_id))
            .collect();
        person.with_children(children)
    }

    fn tree_strategy() -> impl Strategy<Value = Person> {
        shape_strategy().prop_map(|shape| build(&shape, &mut 0))
    }

    /// Every person reachable through `children`, parents before children.
    fn people(root: &Person) -> Vec<&Person> {
        let mut all = vec![root];
        for child in root.children() {
            all.extend(people(child));
        }
        all
    }

    fn named_partner(person: &Person) -> Option<&Person> {
        person.partner().filter(|partner| partner.has_name())
    }

    fn check_cardinality(root: &Person) -> Result<(), TestCaseError> {
        let layout = Engine::default().layout(root, 1200.0);
        let pairs = people(root)
            .into_iter()
            .filter(|person| named_partner(person).is_some())
            .count();

        let person_nodes = layout.nodes().iter().filter(|node| node.is_person()).count();
        let marriage_nodes = layout.nodes().iter().filter(|node| node.is_marriage()).count();
        prop_assert_eq!(person_nodes, root.descendant_count() + pairs);
        prop_assert_eq!(marriage_nodes, pairs);
        Ok(())
    }

    /// Sibling subtrees, at every level, never reach into each other.
    fn check_siblings_disjoint(person: &Person) -> Result<(), TestCaseError> {
        let (children, _) = Engine::default().layout_children(person, Point::new(0.0, 0.0));
        for pair in children.windows(2) {
            prop_assert!(
                pair[1].min_x() >= pair[0].max_x() - 1e-3,
                "siblings overlap: right min_x {} < left max_x {}",
                pair[1].min_x(),
                pair[0].max_x()
            );
        }
        for child in person.children() {
            check_siblings_disjoint(child)?;
        }
        Ok(())
    }

    /// Person boxes of one generation keep at least a box width between centers.
    fn check_boxes_disjoint(root: &Person) -> Result<(), TestCaseError> {
        let engine = Engine::default();
        let layout = engine.layout(root, 1200.0);

        let mut generations: BTreeMap<i64, Vec<f32>> = BTreeMap::new();
        for node in layout.nodes().iter().filter(|node| node.is_person()) {
            generations
                .entry(node.y().round() as i64)
                .or_default()
                .push(node.x());
        }

        for xs in generations.values_mut() {
            xs.sort_by(f32::total_cmp);
            for pair in xs.windows(2) {
                prop_assert!(
                    pair[1] - pair[0] >= engine.config().box_width() - 1e-2,
                    "boxes at {} and {} overlap",
                    pair[0],
                    pair[1]
                );
            }
        }
        Ok(())
    }

    fn check_width_monotonic(person: &Person) -> Result<(), TestCaseError> {
        let engine = Engine::default();
        let config = engine.config();
        let partner = named_partner(person);
        let subtree = engine.layout_tree(person, person.partner(), Point::new(0.0, 0.0));

        let self_block = match partner {
            Some(_) => config.box_width() * 2.0 + nodes::local_pair_gap(config.box_width(), config),
            None => config.box_width(),
        };
        let (children, _) = engine.layout_children(person, Point::new(0.0, 0.0));
        let children_row = width::row_width(
            &children
                .iter()
                .map(SubtreeLayout::subtree_width)
                .collect::<Vec<_>>(),
            config.min_child_gap(),
        );

        prop_assert!(subtree.subtree_width() >= self_block - 1e-3);
        prop_assert!(subtree.subtree_width() >= children_row - 1e-3);

        for child in person.children() {
            check_width_monotonic(child)?;
        }
        Ok(())
    }

    fn check_idempotent(root: &Person) -> Result<(), TestCaseError> {
        let engine = Engine::default();
        let first = engine.layout(root, 1200.0);
        let second = engine.layout(&root.clone(), 1200.0);
        prop_assert_eq!(first, second);
        Ok(())
    }

    fn check_platform_selection(root: &Person) -> Result<(), TestCaseError> {
        let layout = Engine::default().layout(root, 1200.0);
        let count = |direction: &str| {
            layout
                .links()
                .iter()
                .filter(|link| link.direction() == direction)
                .count()
        };

        let everyone = people(root);
        let with_platform: Vec<_> = everyone
            .iter()
            .filter(|person| match person.children() {
                [] => false,
                [child] => named_partner(child).is_some(),
                _ => true,
            })
            .collect();
        let direct = everyone
            .iter()
            .filter(|person| matches!(person.children(), [child] if named_partner(child).is_none()))
            .count();
        let drops: usize = with_platform
            .iter()
            .map(|person| person.children().len())
            .sum();

        prop_assert_eq!(count("platform"), with_platform.len());
        prop_assert_eq!(count("marriageToPlatform"), with_platform.len());
        prop_assert_eq!(count("platformToChild"), drops);
        prop_assert_eq!(count("marriageToChild") + count("personToChild"), direct);
        Ok(())
    }

    proptest! {
        #[test]
        fn cardinality(root in tree_strategy()) {
            check_cardinality(&root)?;
        }

        #[test]
        fn siblings_disjoint(root in tree_strategy()) {
            check_siblings_disjoint(&root)?;
        }

        #[test]
        fn boxes_disjoint(root in tree_strategy()) {
            check_boxes_disjoint(&root)?;
        }

        #[test]
        fn width_monotonic(root in tree_strategy()) {
            check_width_monotonic(&root)?;
        }

        #[test]
        fn idempotent(root in tree_strategy()) {
            check_idempotent(&root)?;
        }

        #[test]
        fn platform_selection(root in tree_strategy()) {
            check_platform_selection(&root)?;
        }
    }
}
