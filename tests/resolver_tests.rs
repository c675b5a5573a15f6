//! Resolver behaviour tests
//!
//! Parameter-by-parameter expectations against the public API, grouped by
//! the platform they run on.

use dockerconf::{
    apply_order, resolve, AuxRepo, DockerParams, Facts, OneOrMany, PackageEnsure, Resource,
    ResourceBody, ResourceKind, ResourceRef, ResourceSet, ServiceState,
};

const SERVICE_CONFIG: &str = "/etc/sysconfig/docker";
const STORAGE_CONFIG: &str = "/etc/sysconfig/docker-storage";

fn redhat_facts() -> Facts {
    Facts::new("RedHat", "RedHat", "6.5")
}

fn resolve_redhat(params: DockerParams) -> Vec<Resource> {
    resolve(&params, &redhat_facts()).expect("resolution should succeed")
}

fn service_config(resources: &[Resource]) -> &str {
    resources.file_content(SERVICE_CONFIG).expect("service config file")
}

// =============================================================================
// RedHat 6.5
// =============================================================================

#[test]
fn test_default_compiles_with_all_resources() {
    let resources = resolve_redhat(DockerParams::default());
    assert!(resources.package().is_some());
    assert!(resources.service().is_some());
    assert!(resources.file_content(SERVICE_CONFIG).is_some());
    assert!(resources.file_content(STORAGE_CONFIG).is_some());
    assert!(apply_order(&resources).is_ok());
}

#[test]
fn test_install_comes_before_config() {
    let resources = resolve_redhat(DockerParams::default());
    let plan = apply_order(&resources).unwrap();

    let package = plan.position(&resources.package().unwrap().reference()).unwrap();
    for path in [SERVICE_CONFIG, STORAGE_CONFIG] {
        let file = plan.position(&ResourceRef::new(ResourceKind::File, path)).unwrap();
        assert!(package < file, "package must precede {}", path);
    }
}

#[test]
fn test_service_subscribes_to_config() {
    let resources = resolve_redhat(DockerParams::default());
    let plan = apply_order(&resources).unwrap();
    let service = ResourceRef::new(ResourceKind::Service, "docker");

    assert_eq!(plan.position(&service), Some(plan.steps.len() - 1));
    for path in [SERVICE_CONFIG, STORAGE_CONFIG] {
        assert!(plan
            .notifications
            .contains(&(ResourceRef::new(ResourceKind::File, path), service.clone())));
    }
}

#[test]
fn test_tmp_dir() {
    let resources = resolve_redhat(DockerParams {
        tmp_dir: Some("/bigtmp".to_string()),
        ..DockerParams::default()
    });
    assert!(service_config(&resources).contains("DOCKER_TMPDIR=\"/bigtmp\""));
}

#[test]
fn test_storage_driver() {
    let resources = resolve_redhat(DockerParams {
        storage_driver: Some("devicemapper".to_string()),
        ..DockerParams::default()
    });
    let storage = resources.file_content(STORAGE_CONFIG).unwrap();
    assert!(storage.contains("--storage-driver=devicemapper"));
}

#[test]
fn test_without_execdriver() {
    let resources = resolve_redhat(DockerParams::default());
    let content = service_config(&resources);
    assert!(!content.contains("-e lxc"));
    assert!(!content.contains("-e native"));
}

#[test]
fn test_with_execdriver() {
    let resources = resolve_redhat(DockerParams {
        execdriver: Some("native".to_string()),
        ..DockerParams::default()
    });
    let content = service_config(&resources);
    assert!(content.contains("-e native"));
    assert!(!content.contains("-e lxc"));
}

#[test]
fn test_dns() {
    let resources = resolve_redhat(DockerParams {
        dns: Some(OneOrMany::from("8.8.8.8")),
        ..DockerParams::default()
    });
    assert!(service_config(&resources).contains("--dns 8.8.8.8"));
}

#[test]
fn test_dns_search() {
    let resources = resolve_redhat(DockerParams {
        dns_search: Some(OneOrMany::from("my.domain.local")),
        ..DockerParams::default()
    });
    assert!(service_config(&resources).contains("--dns-search my.domain.local"));
}

#[test]
fn test_multi_extra_parameters() {
    let resources = resolve_redhat(DockerParams {
        extra_parameters: Some(OneOrMany::from(vec!["--this this", "--that that"])),
        ..DockerParams::default()
    });
    let content = service_config(&resources);
    assert!(content.contains("--this this"));
    assert!(content.contains("--that that"));
}

#[test]
fn test_string_extra_parameters() {
    let resources = resolve_redhat(DockerParams {
        extra_parameters: Some(OneOrMany::from("--this this")),
        ..DockerParams::default()
    });
    assert!(service_config(&resources).contains("--this this"));
}

#[test]
fn test_extra_parameters_keep_spacing() {
    let resources = resolve_redhat(DockerParams {
        extra_parameters: Some(OneOrMany::from("--label  a=b")),
        ..DockerParams::default()
    });
    assert!(service_config(&resources).contains("--label  a=b"));
}

#[test]
fn test_service_state_stopped() {
    let resources = resolve_redhat(DockerParams {
        service_state: ServiceState::Stopped,
        ..DockerParams::default()
    });
    match &resources.service().unwrap().body {
        ResourceBody::Service { name, ensure, .. } => {
            assert_eq!(name, "docker");
            assert_eq!(*ensure, ServiceState::Stopped);
        }
        other => panic!("unexpected body {:?}", other),
    }
}

#[test]
fn test_service_enable_passthrough() {
    for value in ["false", "true"] {
        let resources = resolve_redhat(DockerParams {
            service_enable: value.into(),
            ..DockerParams::default()
        });
        match &resources.service().unwrap().body {
            ResourceBody::Service { enable, .. } => assert_eq!(enable.to_string(), value),
            other => panic!("unexpected body {:?}", other),
        }
    }
}

#[test]
fn test_every_valid_log_level() {
    for level in ["debug", "info", "warn", "error", "fatal"] {
        let resources = resolve_redhat(DockerParams {
            log_level: Some(level.to_string()),
            ..DockerParams::default()
        });
        assert!(service_config(&resources).contains(&format!("-l {}", level)));
    }
}

#[test]
fn test_invalid_log_level() {
    let params = DockerParams {
        log_level: Some("verbose".to_string()),
        ..DockerParams::default()
    };
    let err = resolve(&params, &redhat_facts()).unwrap_err();
    assert!(err
        .to_string()
        .contains("log_level must be one of debug, info, warn, error or fatal"));
}

#[test]
fn test_selinux_enabled() {
    let resources = resolve_redhat(DockerParams {
        selinux_enabled: Some(true),
        ..DockerParams::default()
    });
    assert!(service_config(&resources).contains("--selinux-enabled=true"));
}

#[test]
fn test_ensure_absent() {
    let resources = resolve_redhat(DockerParams {
        ensure: PackageEnsure::Absent,
        ..DockerParams::default()
    });
    match &resources.package().unwrap().body {
        ResourceBody::Package { ensure, .. } => assert_eq!(ensure, "absent"),
        other => panic!("unexpected body {:?}", other),
    }
}

#[test]
fn test_params_from_json() {
    let params: DockerParams = serde_json::from_str(
        r#"{
            "extra_parameters": ["--this this", "--that that"],
            "service_enable": "false",
            "selinux_enabled": true
        }"#,
    )
    .unwrap();
    let resources = resolve_redhat(params);
    let content = service_config(&resources);
    assert!(content.contains("--this this --that that"));
    assert!(content.contains("--selinux-enabled=true"));
}

// =============================================================================
// Versioned RedHat-family platforms
// =============================================================================

fn assert_plain_docker_without_epel(facts: Facts) {
    let resources = resolve(&DockerParams::default(), &facts).unwrap();
    let package = resources.package().unwrap();
    match &package.body {
        ResourceBody::Package { name, .. } => assert_eq!(name, "docker", "{:?}", facts),
        other => panic!("unexpected body {:?}", other),
    }
    assert!(
        resources.iter().all(|r| r.kind() != ResourceKind::Repository),
        "epel must not be included for {:?}",
        facts
    );
}

#[test]
fn test_fedora_21_or_above() {
    assert_plain_docker_without_epel(Facts::new("RedHat", "Family", "21.0"));
    assert_plain_docker_without_epel(Facts::new("RedHat", "Fedora", "21.0"));
}

#[test]
fn test_redhat_7_or_above() {
    assert_plain_docker_without_epel(Facts::new("RedHat", "RedHat", "7.0").with_majrelease("7"));
}

#[test]
fn test_oracle_linux_7_or_above() {
    assert_plain_docker_without_epel(Facts::new("RedHat", "OracleLinux", "7.0").with_majrelease("7"));
}

#[test]
fn test_scientific_linux_7_or_above() {
    assert_plain_docker_without_epel(Facts::new("RedHat", "Scientific", "7.0").with_majrelease("7"));
}

#[test]
fn test_below_threshold_includes_epel() {
    for facts in [
        Facts::new("RedHat", "RedHat", "6.5"),
        Facts::new("RedHat", "Fedora", "20"),
        Facts::new("RedHat", "CentOS", "6.6").with_majrelease("6"),
    ] {
        let resources = resolve(&DockerParams::default(), &facts).unwrap();
        assert!(resources
            .find(ResourceKind::Repository, &AuxRepo::Epel.to_string())
            .is_some());
        assert_eq!(resources.package().unwrap().title(), "docker-io");
    }
}

#[test]
fn test_resolution_is_idempotent() {
    let params = DockerParams {
        dns: Some(OneOrMany::from(vec!["8.8.8.8", "8.8.4.4"])),
        log_level: Some("info".to_string()),
        tmp_dir: Some("/bigtmp".to_string()),
        ..DockerParams::default()
    };
    let facts = redhat_facts();

    let first = resolve(&params, &facts).unwrap();
    let second = resolve(&params, &facts).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

// =============================================================================
// Boundary validation
// =============================================================================

#[test]
fn test_service_enable_non_boolean_rejected() {
    let params: DockerParams = serde_json::from_str(r#"{"service_enable": "banana"}"#).unwrap();
    let err = resolve(&params, &redhat_facts()).unwrap_err();
    assert!(err.is_validation());
    assert!(err.to_string().contains("service_enable must be true or false"));
}

#[test]
fn test_quote_in_rendered_value_rejected() {
    let params = DockerParams {
        tmp_dir: Some("/a\"b".to_string()),
        ..DockerParams::default()
    };
    let err = resolve(&params, &redhat_facts()).unwrap_err();
    assert!(err.is_validation());
    assert!(err.to_string().contains("tmp_dir"));
}

#[test]
fn test_oversized_release_uses_newest_rows() {
    assert_plain_docker_without_epel(Facts::new("RedHat", "Fedora", "99999999999.0"));
}
