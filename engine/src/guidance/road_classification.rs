//! Road class metadata and the comparisons turn guidance builds on.
//!
//! Every edge carries a [`RoadClassification`] describing how important the
//! underlying road is. Road priorities form a coarse total order; turn
//! guidance mostly asks coarser questions than strict ordering, like
//! whether two roads could plausibly be the two arms of a fork or whether
//! one continuation is so much more important than all others that no
//! announcement is needed.

/// Road priorities, lower is more important.
/// Odd values up to tertiary are the `_link` variants of the even value
/// right above.
pub mod road_priority_class {
    pub type RoadPriorityClass = u8;

    pub const MOTORWAY: RoadPriorityClass = 0;
    pub const MOTORWAY_LINK: RoadPriorityClass = 1;
    pub const TRUNK: RoadPriorityClass = 2;
    pub const TRUNK_LINK: RoadPriorityClass = 3;
    pub const PRIMARY: RoadPriorityClass = 4;
    pub const PRIMARY_LINK: RoadPriorityClass = 5;
    pub const SECONDARY: RoadPriorityClass = 6;
    pub const SECONDARY_LINK: RoadPriorityClass = 7;
    pub const TERTIARY: RoadPriorityClass = 8;
    pub const TERTIARY_LINK: RoadPriorityClass = 9;
    pub const MAIN_RESIDENTIAL: RoadPriorityClass = 10;
    pub const SIDE_RESIDENTIAL: RoadPriorityClass = 11;
    pub const ALLEY: RoadPriorityClass = 12;
    pub const PARKING: RoadPriorityClass = 13;
    pub const LINK_ROAD: RoadPriorityClass = 14;
    pub const BIKE_PATH: RoadPriorityClass = 16;
    pub const FOOT_PATH: RoadPriorityClass = 18;
    /// A road offered purely for connectivity.
    /// Ignored in forks and never an obvious continuation.
    pub const CONNECTIVITY: RoadPriorityClass = 31;
}

use road_priority_class::RoadPriorityClass;

/// How much more important a road must be to win obviously.
const PRIORITY_DISTINCTION_FACTOR: f64 = 2.0;

/// Inclusive upper ends of the general road categories.
/// Priorities up to the same divider belong to the same category.
const CATEGORY_DIVIDERS: [RoadPriorityClass; 6] = [
    road_priority_class::TRUNK_LINK,
    road_priority_class::SECONDARY_LINK,
    road_priority_class::SIDE_RESIDENTIAL,
    road_priority_class::ALLEY,
    road_priority_class::PARKING,
    road_priority_class::CONNECTIVITY,
];

#[derive(Debug, Clone, Copy, Eq)]
pub struct RoadClassification {
    /// Behaves like a motorway, with separated directions.
    pub motorway: bool,
    pub link: bool,
    /// Pure connectivity ways that can be ignored in most decisions.
    pub may_be_ignored: bool,
    pub priority: RoadPriorityClass,
    pub num_lanes: u8,
}

impl Default for RoadClassification {
    fn default() -> RoadClassification {
        RoadClassification {
            motorway: false,
            link: false,
            may_be_ignored: false,
            priority: road_priority_class::CONNECTIVITY,
            num_lanes: 0,
        }
    }
}

// lane counts are cosmetic and do not distinguish classifications
impl PartialEq for RoadClassification {
    fn eq(&self, other: &RoadClassification) -> bool {
        self.motorway == other.motorway && self.link == other.link && self.may_be_ignored == other.may_be_ignored && self.priority == other.priority
    }
}

impl RoadClassification {
    pub fn new(motorway: bool, link: bool, may_be_ignored: bool, priority: RoadPriorityClass, num_lanes: u8) -> RoadClassification {
        RoadClassification {
            motorway,
            link,
            may_be_ignored,
            priority,
            num_lanes,
        }
    }

    pub fn is_motorway_class(&self) -> bool {
        self.motorway
    }

    pub fn is_ramp_class(&self) -> bool {
        self.motorway && self.link
    }

    pub fn is_link_class(&self) -> bool {
        self.link
    }

    pub fn is_low_priority_class(&self) -> bool {
        self.may_be_ignored
    }

    fn category(&self) -> usize {
        CATEGORY_DIVIDERS.partition_point(|&divider| divider <= self.priority)
    }

    /// Whether two roads are close enough in importance to be announced as
    /// the two arms of a fork.
    pub fn can_be_seen_as_fork(&self, other: &RoadClassification) -> bool {
        self.priority.abs_diff(other.priority) <= 1
    }

    /// A strict order between general road categories, following the
    /// priority values: smaller is more important, so a motorway is
    /// strictly less than a city road. Within one category no road is
    /// strictly ordered against another.
    pub fn strictly_less(&self, other: &RoadClassification) -> bool {
        self.category() < other.category()
    }

    /// Whether `self` is the fitting link class leading onto `other`,
    /// e.g. a motorway_link onto a motorway.
    pub fn is_link_to(&self, other: &RoadClassification) -> bool {
        if !self.is_link_class() || other.is_link_class() {
            return false;
        }
        matches!(
            (self.priority, other.priority),
            (road_priority_class::MOTORWAY_LINK, road_priority_class::MOTORWAY)
                | (road_priority_class::TRUNK_LINK, road_priority_class::TRUNK)
                | (road_priority_class::PRIMARY_LINK, road_priority_class::PRIMARY)
                | (road_priority_class::SECONDARY_LINK, road_priority_class::SECONDARY)
                | (road_priority_class::TERTIARY_LINK, road_priority_class::TERTIARY)
        )
    }
}

/// Whether continuing onto `candidate` is the unsurprising choice purely by
/// road class, with `alternative` being the best other turn option.
pub fn obvious_by_road_class(incoming: RoadClassification, candidate: RoadClassification, alternative: RoadClassification) -> bool {
    // passing a motorway ramp on a motorway
    if incoming.is_motorway_class() && candidate.is_motorway_class() && alternative.is_ramp_class() {
        return true;
    }

    let passing_ramp = alternative.is_ramp_class() && !incoming.is_motorway_class();

    // passing a link class, other than motorway
    if !incoming.is_motorway_class()
        && !candidate.is_motorway_class()
        && !incoming.is_link_class()
        && !candidate.is_link_class()
        && !alternative.is_ramp_class()
        && alternative.is_link_class()
    {
        return true;
    }

    // lower numbers are of higher priority, except for motorway links which
    // are links in general but also quite high priority roads
    let has_high_priority =
        PRIORITY_DISTINCTION_FACTOR * f64::from(candidate.priority) < f64::from(alternative.priority) && !alternative.is_ramp_class();

    let continues_on_same_class = incoming == candidate;

    (has_high_priority && continues_on_same_class && !passing_ramp)
        || (!candidate.is_low_priority_class() && !incoming.is_low_priority_class() && alternative.is_low_priority_class())
}

#[cfg(test)]
mod tests {
    use super::road_priority_class::*;
    use super::*;

    fn class(priority: RoadPriorityClass) -> RoadClassification {
        RoadClassification::new(false, priority % 2 == 1 && priority < MAIN_RESIDENTIAL, false, priority, 2)
    }

    #[test]
    fn lanes_do_not_distinguish_classifications() {
        let two_lanes = RoadClassification::new(true, false, false, MOTORWAY, 2);
        let four_lanes = RoadClassification::new(true, false, false, MOTORWAY, 4);
        assert_eq!(two_lanes, four_lanes);
    }

    #[test]
    fn forks_need_nearly_equal_priorities() {
        assert!(class(PRIMARY).can_be_seen_as_fork(&class(PRIMARY)));
        assert!(class(PRIMARY).can_be_seen_as_fork(&class(PRIMARY_LINK)));
        assert!(!class(PRIMARY).can_be_seen_as_fork(&class(SECONDARY)));
        assert!(!class(MOTORWAY).can_be_seen_as_fork(&class(ALLEY)));
    }

    #[test]
    fn strict_order_only_crosses_category_boundaries() {
        // motorways and trunks share the top category
        assert!(!class(TRUNK).strictly_less(&class(MOTORWAY)));
        assert!(!class(MOTORWAY).strictly_less(&class(TRUNK)));
        // the top category against main roads
        assert!(class(MOTORWAY).strictly_less(&class(PRIMARY)));
        assert!(!class(PRIMARY).strictly_less(&class(MOTORWAY)));
        // main roads among each other
        assert!(!class(PRIMARY).strictly_less(&class(SECONDARY)));
        assert!(!class(SECONDARY).strictly_less(&class(PRIMARY)));
        assert!(class(SECONDARY).strictly_less(&class(TERTIARY)));
        // residential roads against alleys and parking aisles
        assert!(class(MAIN_RESIDENTIAL).strictly_less(&class(ALLEY)));
        assert!(class(ALLEY).strictly_less(&class(PARKING)));
        assert!(!class(PARKING).strictly_less(&class(ALLEY)));
    }

    #[test]
    fn links_lead_onto_their_through_road() {
        let ramp = RoadClassification::new(true, true, false, MOTORWAY_LINK, 1);
        let motorway = RoadClassification::new(true, false, false, MOTORWAY, 3);
        assert!(ramp.is_link_to(&motorway));
        assert!(!motorway.is_link_to(&ramp));
        assert!(!class(PRIMARY_LINK).is_link_to(&class(SECONDARY)));
        assert!(!class(PRIMARY_LINK).is_link_to(&class(TERTIARY_LINK)));
        assert!(class(SECONDARY_LINK).is_link_to(&class(SECONDARY)));
    }

    #[test]
    fn ramp_classification_flags() {
        let ramp = RoadClassification::new(true, true, false, MOTORWAY_LINK, 1);
        assert!(ramp.is_ramp_class());
        assert!(ramp.is_motorway_class());
        assert!(ramp.is_link_class());
        let motorway = RoadClassification::new(true, false, false, MOTORWAY, 3);
        assert!(motorway.is_motorway_class());
        assert!(!motorway.is_ramp_class());
    }

    #[test]
    fn obviousness_requires_clearly_minor_alternatives() {
        let primary = class(PRIMARY);
        let residential = class(MAIN_RESIDENTIAL);
        // staying on the primary past a residential side street is obvious
        assert!(obvious_by_road_class(primary, primary, residential));
        // two primaries are a real decision point
        assert!(!obvious_by_road_class(primary, primary, primary));
        // turning onto the residential road is not obvious either
        assert!(!obvious_by_road_class(primary, residential, primary));
    }

    #[test]
    fn passing_ramps_and_links_is_obvious() {
        let motorway = RoadClassification::new(true, false, false, MOTORWAY, 3);
        let ramp = RoadClassification::new(true, true, false, MOTORWAY_LINK, 1);
        assert!(obvious_by_road_class(motorway, motorway, ramp));
        // off the motorway network, ramps block the obvious continuation
        assert!(!obvious_by_road_class(class(PRIMARY), class(PRIMARY), ramp));
        // plain link classes are passed without an announcement
        assert!(obvious_by_road_class(class(PRIMARY), class(PRIMARY), class(PRIMARY_LINK)));
    }

    #[test]
    fn ignorable_alternatives_never_break_obviousness() {
        let service = RoadClassification::new(false, false, true, CONNECTIVITY, 1);
        assert!(obvious_by_road_class(class(PRIMARY), class(TERTIARY), service));
        assert!(!obvious_by_road_class(service, class(TERTIARY), class(PRIMARY)));
    }
}
