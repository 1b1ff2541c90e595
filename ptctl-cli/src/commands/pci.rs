//! `ptctl pci` commands

use anyhow::{Context, Result};
use colored::Colorize;
use ptctl_core::passthru::{DevicePassthru, HostPassthruReport};
use ptctl_core::{PassthruConfigChange, PassthruManager, PassthruReport};
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "ADDRESS")]
    address: String,
    #[tabled(rename = "DESCRIPTION")]
    description: String,
    #[tabled(rename = "PARENT")]
    parent: String,
    #[tabled(rename = "PASSTHROUGH")]
    passthrough: String,
}

impl From<&DevicePassthru> for DeviceRow {
    fn from(device: &DevicePassthru) -> Self {
        Self {
            address: device.id.clone(),
            description: or_dash(&device.vendor_name),
            parent: or_dash(&device.parent_bridge),
            passthrough: device.status.to_string(),
        }
    }
}

fn or_dash(value: &str) -> String {
    if value.is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}

fn host_table(host: &HostPassthruReport) -> Table {
    let rows: Vec<DeviceRow> = host.devices.iter().map(DeviceRow::from).collect();
    let mut table = Table::new(rows);
    table.with(Style::modern());
    table
}

/// List PCI devices and their passthrough status
pub async fn ls(manager: &PassthruManager, hosts: &[String], json: bool) -> Result<()> {
    let report = manager.list(hosts).await?;

    if json {
        println!("{}", render_json(&report)?);
        return Ok(());
    }

    if report.is_empty() {
        println!("No hosts to list");
        return Ok(());
    }

    for host in &report.hosts {
        println!("{} {}", "Name:".bold(), host.name.bold());
        if host.devices.is_empty() {
            println!("  No PCI devices");
        } else {
            println!("{}", host_table(host));
        }
    }

    Ok(())
}

fn render_json(report: &PassthruReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("Failed to serialize passthrough report")
}

/// Toggle passthrough on the given device addresses
pub async fn toggle(manager: &PassthruManager, addresses: &[String]) -> Result<()> {
    let changes = match manager.toggle(addresses).await {
        Ok(changes) => changes,
        Err(err) => {
            if let Some(id) = err.device_id() {
                eprintln!(
                    "{} run `ptctl pci ls` to check the passthrough status of {}",
                    "hint:".yellow().bold(),
                    id
                );
            }
            return Err(err.into());
        }
    };

    println!("{} {}", "✓".green().bold(), toggle_summary(&changes));
    for change in &changes {
        println!("  {} {}", change.id.bold(), enablement(change.passthru_enabled));
    }
    Ok(())
}

fn toggle_summary(changes: &[PassthruConfigChange]) -> String {
    format!(
        "Passthrough toggled on {} device(s). A host reboot may be required.",
        changes.len()
    )
}

fn enablement(enabled: bool) -> &'static str {
    if enabled {
        "enabled"
    } else {
        "disabled"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ptctl_core::{HostRef, PassthruStatus};

    fn device(id: &str, vendor: &str, parent: &str, status: PassthruStatus) -> DevicePassthru {
        DevicePassthru {
            id: id.to_string(),
            vendor_name: vendor.to_string(),
            parent_bridge: parent.to_string(),
            status,
        }
    }

    #[test]
    fn test_device_row_columns() {
        let row = DeviceRow::from(&device(
            "0000:02:00.0",
            "NVIDIA Corporation",
            "0000:00:01.0",
            PassthruStatus::Enabled,
        ));

        assert_eq!(row.address, "0000:02:00.0");
        assert_eq!(row.description, "NVIDIA Corporation");
        assert_eq!(row.parent, "0000:00:01.0");
        assert_eq!(row.passthrough, "Enabled");
    }

    #[test]
    fn test_device_row_blank_fields() {
        let row = DeviceRow::from(&device("0000:00:00.0", "", "", PassthruStatus::NotCapable));

        assert_eq!(row.description, "-");
        assert_eq!(row.parent, "-");
        assert_eq!(row.passthrough, "Not Capable");
    }

    #[test]
    fn test_host_table_keeps_device_order() {
        let host = HostPassthruReport {
            name: "esx-01".to_string(),
            reference: HostRef::host_system("host-21"),
            devices: vec![
                device("0000:03:00.0", "Intel", "", PassthruStatus::Active),
                device("0000:02:00.0", "Intel", "", PassthruStatus::Disabled),
            ],
        };

        let rendered = host_table(&host).to_string();
        assert!(rendered.contains("PASSTHROUGH"));
        let first = rendered.find("0000:03:00.0").unwrap();
        let second = rendered.find("0000:02:00.0").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_json_uses_snake_case_status() {
        let report = PassthruReport {
            hosts: vec![HostPassthruReport {
                name: "esx-01".to_string(),
                reference: HostRef::host_system("host-21"),
                devices: vec![device("0000:02:00.0", "", "", PassthruStatus::NotCapable)],
            }],
        };

        let json = render_json(&report).unwrap();
        assert!(json.contains("\"not_capable\""));
        assert!(json.contains("\"esx-01\""));
    }

    #[test]
    fn test_toggle_summary_counts_changes() {
        let changes = vec![PassthruConfigChange {
            id: "0000:02:00.0".to_string(),
            passthru_enabled: true,
        }];

        assert!(toggle_summary(&changes).contains("on 1 device(s)"));
        assert_eq!(enablement(changes[0].passthru_enabled), "enabled");
        assert_eq!(enablement(false), "disabled");
    }
}
