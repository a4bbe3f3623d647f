//! Tests for configuration file models.

use tempfile::TempDir;

use crate::options::NutMode;

use super::*;

mod nut_conf {
    use super::*;

    #[test]
    fn parses_mode_assignment() {
        let conf = NutConf::parse("# NUT mode\nMODE=netserver\n").unwrap();

        assert_eq!(conf.mode(), Some(NutMode::Netserver));
        assert!(conf.is_configured());
    }

    #[test]
    fn quoted_mode_is_accepted() {
        let conf = NutConf::parse("MODE=\"standalone\"\n").unwrap();

        assert_eq!(conf.mode(), Some(NutMode::Standalone));
    }

    #[test]
    fn none_and_unknown_modes_are_not_configured() {
        assert!(!NutConf::parse("MODE=none").unwrap().is_configured());
        assert!(!NutConf::parse("MODE=bogus").unwrap().is_configured());
        assert!(!NutConf::default().is_configured());
    }

    #[test]
    fn unknown_mode_keeps_raw_value() {
        let conf = NutConf::parse("MODE=bogus").unwrap();

        assert_eq!(conf.mode_value(), Some("bogus"));
        assert_eq!(conf.mode(), None);
    }

    #[test]
    fn set_mode_replaces_in_place() {
        let mut conf = NutConf::parse("# header\nMODE=none\n# footer\nMODE=manual\n").unwrap();

        conf.set_mode(NutMode::Standalone);

        assert_eq!(conf.render(), "# header\nMODE=standalone\n# footer\n");
    }

    #[test]
    fn set_mode_appends_when_missing() {
        let mut conf = NutConf::parse("# empty\n").unwrap();

        conf.set_mode(NutMode::Netclient);

        assert_eq!(conf.render(), "# empty\nMODE=netclient\n");
    }
}

mod upsmon_conf {
    use super::*;

    const SAMPLE: &str = "\
# upsmon
MINSUPPLIES 1
MONITOR ups1@localhost 1 monuser secret master
MONITOR ups2@10.0.0.2:3494 2 mon \"pass word\" slave
SHUTDOWNCMD \"/sbin/shutdown -h now\"
";

    fn monitor(ups: &str) -> Monitor {
        Monitor {
            ups: ups.to_string(),
            host: "localhost".to_string(),
            port: None,
            power_value: 1,
            username: "monuser".to_string(),
            password: "secret".to_string(),
            role: MonitorRole::Master,
        }
    }

    #[test]
    fn parses_monitors() {
        let conf = UpsmonConf::parse(SAMPLE).unwrap();
        let monitors: Vec<_> = conf.monitors().collect();

        assert_eq!(monitors.len(), 2);
        assert_eq!(*monitors[0], monitor("ups1"));
        assert_eq!(monitors[1].host, "10.0.0.2");
        assert_eq!(monitors[1].port, Some(3494));
        assert_eq!(monitors[1].password, "pass word");
        assert_eq!(monitors[1].role, MonitorRole::Slave);
    }

    #[test]
    fn round_trip_keeps_other_lines() {
        let conf = UpsmonConf::parse(SAMPLE).unwrap();

        assert_eq!(conf.render(), SAMPLE);
    }

    #[test]
    fn clear_then_add_replaces_monitors() {
        let mut conf = UpsmonConf::parse(SAMPLE).unwrap();

        conf.clear_monitors();
        conf.add_monitor(monitor("ups3"));

        let rendered = conf.render();
        assert!(rendered.contains("MINSUPPLIES 1\n"));
        assert!(rendered.ends_with("MONITOR ups3@localhost 1 monuser secret master\n"));
        assert!(!rendered.contains("ups1@"));
    }

    #[test]
    fn primary_secondary_are_accepted() {
        let conf = UpsmonConf::parse("MONITOR u@h 1 a b primary\nMONITOR v@h 1 a b secondary").unwrap();
        let roles: Vec<_> = conf.monitors().map(|m| m.role).collect();

        assert_eq!(roles, [MonitorRole::Master, MonitorRole::Slave]);
    }

    #[test]
    fn malformed_monitor_reports_line() {
        let error = UpsmonConf::parse("# ok\nMONITOR ups1 1 a b master\n").unwrap_err();

        assert_eq!(error.line, 2);
        assert!(error.reason.contains("<ups>@<host>"));
    }

    #[test]
    fn bad_power_value_is_error() {
        let error = UpsmonConf::parse("MONITOR u@h x a b master").unwrap_err();

        assert!(error.reason.contains("power value"));
    }

    #[test]
    fn host_port_split_uses_last_colon() {
        assert_eq!(split_host_port("h:1:2"), Some(("h:1", Some(2))));
        assert_eq!(split_host_port("h:99999"), None);
    }
}

mod upsd_conf {
    use super::*;

    #[test]
    fn parses_listen_with_and_without_port() {
        let conf = UpsdConf::parse("MAXAGE 15\nLISTEN 127.0.0.1 3493\nLISTEN ::1\n").unwrap();
        let listens: Vec<_> = conf.listens().cloned().collect();

        assert_eq!(
            listens,
            [
                Listen {
                    address: "127.0.0.1".to_string(),
                    port: Some(3493),
                },
                Listen {
                    address: "::1".to_string(),
                    port: None,
                },
            ]
        );
    }

    #[test]
    fn invalid_port_is_error() {
        let error = UpsdConf::parse("LISTEN 0.0.0.0 nope").unwrap_err();

        assert_eq!(error.line, 1);
    }

    #[test]
    fn bare_listen_is_error() {
        assert!(UpsdConf::parse("LISTEN").is_err());
    }

    #[test]
    fn clear_keeps_other_directives() {
        let mut conf = UpsdConf::parse("MAXAGE 15\nLISTEN 127.0.0.1\n").unwrap();

        conf.clear_listens();
        conf.add_listen(Listen {
            address: "0.0.0.0".to_string(),
            port: Some(3493),
        });

        assert_eq!(conf.render(), "MAXAGE 15\nLISTEN 0.0.0.0 3493\n");
    }
}

mod ups_conf {
    use super::*;

    const SAMPLE: &str = "\
maxretry = 3

[ups1]
\tdriver = usbhid-ups
\tport = auto
\tdesc = \"Office UPS\"

[ups2]
\tdriver = snmp-ups
\tport = 10.0.0.2
\tnolock
";

    #[test]
    fn parses_sections_and_settings() {
        let conf = UpsConf::parse(SAMPLE).unwrap();

        assert_eq!(conf.devices().collect::<Vec<_>>(), ["ups1", "ups2"]);
        assert_eq!(conf.global("maxretry"), Some("3"));
        assert_eq!(conf.get("ups1", "desc"), Some("Office UPS"));
        assert_eq!(conf.get("ups2", "nolock"), Some(""));
        assert_eq!(conf.get("ups2", "desc"), None);
        assert_eq!(conf.get("ups3", "driver"), None);
    }

    #[test]
    fn round_trip_is_stable() {
        let conf = UpsConf::parse(SAMPLE).unwrap();

        assert_eq!(conf.render(), SAMPLE);
    }

    #[test]
    fn set_updates_existing_setting() {
        let mut conf = UpsConf::parse(SAMPLE).unwrap();

        conf.set_port("ups1", "/dev/ttyS0");

        assert_eq!(conf.get("ups1", "port"), Some("/dev/ttyS0"));
        assert_eq!(UpsConf::parse(&conf.render()).unwrap(), conf);
    }

    #[test]
    fn set_creates_missing_device() {
        let mut conf = UpsConf::parse("maxretry = 3\n").unwrap();

        conf.set_driver("new", "dummy-ups");
        conf.set_port("new", "dummy.dev");
        conf.set_description("new", "Test UPS");

        assert_eq!(
            conf.render(),
            "maxretry = 3\n\n[new]\n\tdriver = dummy-ups\n\tport = dummy.dev\n\tdesc = \"Test UPS\"\n"
        );
    }

    #[test]
    fn new_setting_goes_before_trailing_blank_line() {
        let mut conf = UpsConf::parse("[a]\n\tdriver = x\n\n[b]\n\tdriver = y\n").unwrap();

        conf.set_port("a", "auto");

        assert_eq!(
            conf.render(),
            "[a]\n\tdriver = x\n\tport = auto\n\n[b]\n\tdriver = y\n"
        );
    }

    #[test]
    fn clear_devices_keeps_global_section() {
        let mut conf = UpsConf::parse(SAMPLE).unwrap();

        conf.clear_devices();

        assert_eq!(conf.devices().count(), 0);
        assert_eq!(conf.global("maxretry"), Some("3"));
    }

    #[test]
    fn device_names_survive_render_and_parse() {
        let mut conf = UpsConf::default();

        for id in ["ups1", "rack-2.ups_a", "ups@lab"] {
            assert!(UpsConf::is_device_name(id), "{id}");
            conf.set_driver(id, "dummy-ups");
        }
        conf.set_description("ups1", "Rack UPS # 2 \"east\"");

        let reparsed = UpsConf::parse(&conf.render()).unwrap();

        assert_eq!(
            reparsed.devices().collect::<Vec<_>>(),
            conf.devices().collect::<Vec<_>>()
        );
        assert_eq!(reparsed.get("ups@lab", "driver"), Some("dummy-ups"));
        assert_eq!(reparsed.get("ups1", "desc"), Some("Rack UPS # 2 \"east\""));
    }

    #[test]
    fn unrepresentable_device_names() {
        for id in ["my ups", "", "[ups]", "a]b", "ups\n1", "k=v", "x#y", "q\""] {
            assert!(!UpsConf::is_device_name(id), "{id:?}");
        }
    }

    #[test]
    fn unquoted_multi_word_value_is_error() {
        let error = UpsConf::parse("[a]\n\tdesc = two words\n").unwrap_err();

        assert_eq!(error.line, 2);
    }
}

mod local_files {
    use super::*;

    #[test]
    fn read_missing_file_is_none() {
        let dir = TempDir::new().unwrap();

        assert!(LocalFiles.read(&dir.path().join("ups.conf")).unwrap().is_none());
    }

    #[test]
    fn write_then_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("upsd.conf");

        LocalFiles.write(&path, "LISTEN 127.0.0.1\n").unwrap();

        assert!(LocalFiles.exists(&path));
        assert_eq!(
            LocalFiles.read(&path).unwrap().as_deref(),
            Some("LISTEN 127.0.0.1\n")
        );
        assert!(!dir.path().join("upsd.conf.tmp").exists());
    }

    #[test]
    fn write_replaces_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nut.conf");

        LocalFiles.write(&path, "MODE=none\n").unwrap();
        LocalFiles.write(&path, "MODE=standalone\n").unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "MODE=standalone\n"
        );
    }

    #[test]
    fn write_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("nut.conf");

        let error = LocalFiles.write(&path, "MODE=none\n").unwrap_err();

        assert!(matches!(error, ConfError::Write { .. }));
    }
}
