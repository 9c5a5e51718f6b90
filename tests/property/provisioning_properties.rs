// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Provisioning Runs

use std::collections::HashSet;

use netbox_site_provisioner::domain::slugify;
use netbox_site_provisioner::SiteProvisioner;
use proptest::prelude::*;

use crate::fixtures::{request, seeded_repository};

fn site_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,7}( [A-Z0-9]{1,3})?"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: the report has one header plus two rows per requested device
    #[test]
    fn prop_report_row_count(site in site_name(), switches in -2i64..5, servers in -2i64..5) {
        let (repo, catalog) = seeded_repository();
        let mut provisioner = SiteProvisioner::new(repo);
        let outcome = tokio_test::block_on(
            provisioner.provision(&request(&catalog, &site, switches, servers)),
        )
        .unwrap();

        let expected = 2 * (switches.max(0) + servers.max(0)) as usize;
        prop_assert_eq!(outcome.devices.len(), expected);
        prop_assert_eq!(outcome.report.lines().count(), 1 + expected);
        prop_assert_eq!(outcome.report.lines().next(), Some("name,make,model"));
    }

    /// Property: device names are unique and follow the per-role convention
    #[test]
    fn prop_device_names(site in site_name(), switches in 0i64..4, servers in 0i64..4) {
        let (repo, catalog) = seeded_repository();
        let mut provisioner = SiteProvisioner::new(repo);
        let outcome = tokio_test::block_on(
            provisioner.provision(&request(&catalog, &site, switches, servers)),
        )
        .unwrap();

        let unique: HashSet<_> = outcome.devices.iter().map(|d| d.name.as_str()).collect();
        prop_assert_eq!(unique.len(), outcome.devices.len());

        let switch_suffix = format!(".{}", site);
        let server_suffix = format!(".{}", slugify(&site));
        for device in &outcome.devices {
            if device.role.name == "pe" {
                prop_assert!(device.name.starts_with("pe"));
                prop_assert!(device.name.ends_with(&switch_suffix));
            } else {
                prop_assert!(device.name.starts_with("csvr"));
                prop_assert!(device.name.ends_with(&server_suffix));
            }
        }
    }
}
