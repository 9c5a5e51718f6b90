// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Naming and Slugs

use netbox_site_provisioner::domain::{
    is_slug, rack_name, server_name, slugify, switch_name, Zone,
};
use proptest::prelude::*;

fn zone() -> impl Strategy<Value = Zone> {
    prop_oneof![Just(Zone::A), Just(Zone::B)]
}

proptest! {
    /// Property: rack names are `{site}_{zone}1` for any site name
    #[test]
    fn prop_rack_name_shape(site in "\\PC{1,24}", zone in zone()) {
        prop_assert_eq!(rack_name(&site, zone), format!("{}_{}1", site, zone.label()));
    }

    /// Property: switch names interpolate the raw site name
    #[test]
    fn prop_switch_name_shape(site in "\\PC{1,24}", index in 1i64..100, zone in zone()) {
        prop_assert_eq!(
            switch_name(index, zone, &site),
            format!("pe{}{}1.{}", index, zone.label(), site)
        );
    }

    /// Property: server names interpolate the lowercased slug
    #[test]
    fn prop_server_name_shape(site in "[A-Za-z0-9 ]{1,24}", index in 1i64..100, zone in zone()) {
        let slug = slugify(&site);
        let name = server_name(index, zone, &slug);
        prop_assert_eq!(&name, &format!("csvr{}{}1.{}", index, zone.label(), slug));
        prop_assert_eq!(name.to_lowercase(), name);
    }

    /// Property: slugify is idempotent and yields only slug characters
    #[test]
    fn prop_slugify_idempotent(value in "\\PC{0,40}") {
        let slug = slugify(&value);
        prop_assert_eq!(slugify(&slug), slug.clone());
        prop_assert!(slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_'));
        prop_assert!(!slug.starts_with('-') && !slug.ends_with('-'));
        prop_assert!(slug.is_empty() || is_slug(&slug));
    }
}
