//! Applies validated options to the configuration files.
//!
//! Each file is sourced (if present), edited and stored back. Repeatable
//! families either replace the existing entries or append to them, depending
//! on whether their "add" variant was used.

use std::path::PathBuf;

use thiserror::Error;

use crate::conf::{
    ConfError, ConfFile, ConfFiles, Listen, Monitor, MonitorRole, NutConf, UpsConf, UpsdConf,
    UpsmonConf, fits_line, split_host_port,
};
use crate::options::{
    DeviceSpec, Family, ListenSpec, MonitorSpec, NutMode, OptionsError, ValidatedOptions,
};

#[cfg(test)]
#[path = "writer_tests.rs"]
mod tests;

/// Error type for applying options to configuration files.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Configuration file could not be read, parsed or written.
    #[error(transparent)]
    Conf(#[from] ConfError),

    /// Monitor `host[:port]` could not be parsed.
    #[error("failed to parse host specification \"{0}\"")]
    HostSpec(String),

    /// Monitor power value is not a non-negative integer.
    #[error("failed to parse power value \"{0}\"")]
    PowerValue(String),

    /// Listen port is not a valid port number.
    #[error("failed to parse port specification \"{0}\"")]
    Port(String),

    /// Device identifier cannot be used as a `ups.conf` section name.
    #[error("invalid device identifier \"{0}\"")]
    DeviceId(String),

    /// Value contains characters that cannot be written on one line.
    #[error("value {0:?} cannot be written to a configuration file")]
    Unwritable(String),

    /// Validated options were read out of range.
    #[error("INTERNAL ERROR: {0}")]
    Options(#[from] OptionsError),
}

/// Rejects values that would break the line structure of a file.
fn writable(value: &str) -> Result<(), WriteError> {
    if fits_line(value) {
        Ok(())
    } else {
        Err(WriteError::Unwritable(value.to_string()))
    }
}

/// Checks that `device` renders into a section that parses back unchanged.
fn check_device(device: &DeviceSpec) -> Result<(), WriteError> {
    if !UpsConf::is_device_name(&device.id) {
        return Err(WriteError::DeviceId(device.id.clone()));
    }

    writable(&device.driver)?;
    writable(&device.port)?;

    if let Some(description) = &device.description {
        writable(description)?;
    }

    Ok(())
}

impl TryFrom<MonitorSpec<'_>> for Monitor {
    type Error = WriteError;

    fn try_from(spec: MonitorSpec<'_>) -> Result<Self, Self::Error> {
        for value in [spec.ups, spec.host_port, spec.user, spec.password] {
            writable(value)?;
        }

        let (host, port) = split_host_port(spec.host_port)
            .ok_or_else(|| WriteError::HostSpec(spec.host_port.to_string()))?;

        let power_value = spec
            .power_value
            .parse()
            .map_err(|_| WriteError::PowerValue(spec.power_value.to_string()))?;

        Ok(Self {
            ups: spec.ups.to_string(),
            host: host.to_string(),
            port,
            power_value,
            username: spec.user.to_string(),
            password: spec.password.to_string(),
            role: if spec.role == MonitorRole::Master.as_str() {
                MonitorRole::Master
            } else {
                MonitorRole::Slave
            },
        })
    }
}

impl TryFrom<&ListenSpec> for Listen {
    type Error = WriteError;

    fn try_from(spec: &ListenSpec) -> Result<Self, Self::Error> {
        writable(&spec.address)?;

        let port = spec
            .port
            .as_deref()
            .map(|port| port.parse().map_err(|_| WriteError::Port(port.to_string())))
            .transpose()?;

        Ok(Self {
            address: spec.address.clone(),
            port,
        })
    }
}

/// Edits the configuration files of one configuration directory.
#[derive(Debug)]
pub struct ConfWriter<'a, F> {
    files: &'a F,
    dir: PathBuf,
}

impl<'a, F: ConfFiles> ConfWriter<'a, F> {
    /// Creates a writer for `dir`.
    pub fn new(files: &'a F, dir: impl Into<PathBuf>) -> Self {
        Self {
            files,
            dir: dir.into(),
        }
    }

    /// Path of the file modelled by `C`.
    #[must_use]
    pub fn path<C: ConfFile>(&self) -> PathBuf {
        self.dir.join(C::FILE_NAME)
    }

    /// Loads a configuration file; a missing file yields the empty model.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn source<C: ConfFile>(&self) -> Result<C, WriteError> {
        let path = self.path::<C>();

        let Some(content) = self.files.read(&path)? else {
            tracing::debug!("{} not found, starting from an empty file", path.display());
            return Ok(C::default());
        };

        C::parse(&content).map_err(|source| ConfError::Parse { path, source }.into())
    }

    /// Stores a configuration file, replacing its content.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn store<C: ConfFile>(&self, conf: &C) -> Result<(), WriteError> {
        let path = self.path::<C>();

        self.files.write(&path, &conf.render())?;
        tracing::info!("Updated {}", path.display());

        Ok(())
    }

    /// Returns `true` if `nut.conf` exists and sets a mode other than `none`.
    ///
    /// # Errors
    ///
    /// Returns an error if `nut.conf` exists but cannot be read or parsed.
    pub fn is_configured(&self) -> Result<bool, WriteError> {
        Ok(self.source::<NutConf>()?.is_configured())
    }

    /// Sets the mode in `nut.conf`.
    ///
    /// # Errors
    ///
    /// Returns an error if `nut.conf` cannot be sourced or stored.
    pub fn set_mode(&self, mode: NutMode) -> Result<(), WriteError> {
        let mut nut_conf: NutConf = self.source()?;

        nut_conf.set_mode(mode);
        self.store(&nut_conf)
    }

    /// Sets the monitors in `upsmon.conf`.
    ///
    /// # Errors
    ///
    /// Returns an error if `upsmon.conf` cannot be sourced or stored.
    pub fn set_monitors(
        &self,
        monitors: Vec<Monitor>,
        keep_existing: bool,
    ) -> Result<(), WriteError> {
        let mut upsmon_conf: UpsmonConf = self.source()?;

        if !keep_existing {
            upsmon_conf.clear_monitors();
        }

        for monitor in monitors {
            upsmon_conf.add_monitor(monitor);
        }

        self.store(&upsmon_conf)
    }

    /// Sets the listen addresses in `upsd.conf`.
    ///
    /// # Errors
    ///
    /// Returns an error if `upsd.conf` cannot be sourced or stored.
    pub fn set_listen_addrs(
        &self,
        listens: Vec<Listen>,
        keep_existing: bool,
    ) -> Result<(), WriteError> {
        let mut upsd_conf: UpsdConf = self.source()?;

        if !keep_existing {
            upsd_conf.clear_listens();
        }

        for listen in listens {
            upsd_conf.add_listen(listen);
        }

        self.store(&upsd_conf)
    }

    /// Sets the devices in `ups.conf`; the global section is always kept.
    ///
    /// # Errors
    ///
    /// Returns an error if a device cannot be represented in `ups.conf`, or
    /// if `ups.conf` cannot be sourced or stored.
    pub fn set_devices(
        &self,
        devices: &[DeviceSpec],
        keep_existing: bool,
    ) -> Result<(), WriteError> {
        devices.iter().try_for_each(check_device)?;

        let mut ups_conf: UpsConf = self.source()?;

        if !keep_existing {
            ups_conf.clear_devices();
        }

        for device in devices {
            ups_conf.set_driver(&device.id, &device.driver);
            ups_conf.set_port(&device.id, &device.port);

            if let Some(description) = &device.description {
                ups_conf.set_description(&device.id, description);
            }
        }

        self.store(&ups_conf)
    }

    /// Applies every configuration change requested by `options`.
    ///
    /// All monitor, listen and device specifications are checked before any
    /// file is touched, so a malformed value leaves the directory unchanged.
    ///
    /// # Errors
    ///
    /// Returns the first conversion or file error.
    pub fn apply(&self, options: &ValidatedOptions) -> Result<(), WriteError> {
        let monitors = (0..options.monitor_count())
            .map(|index| Monitor::try_from(options.monitor(index)?))
            .collect::<Result<Vec<_>, _>>()?;

        let listens = options
            .listen_addrs()
            .iter()
            .map(Listen::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        options.devices().iter().try_for_each(check_device)?;

        if options.autoconfigure() {
            tracing::warn!("Autoconfiguration is not supported, ignoring --autoconfigure");
        }

        if let Some(mode) = options.mode() {
            tracing::debug!("Setting NUT mode to {mode}");
            self.set_mode(mode)?;
        }

        if !monitors.is_empty() {
            tracing::debug!("Setting {} monitor(s)", monitors.len());
            self.set_monitors(monitors, options.keep_existing(Family::Monitor))?;
        }

        if !listens.is_empty() {
            tracing::debug!("Setting {} listen address(es)", listens.len());
            self.set_listen_addrs(listens, options.keep_existing(Family::Listen))?;
        }

        if !options.devices().is_empty() {
            tracing::debug!("Setting {} device(s)", options.devices().len());
            self.set_devices(options.devices(), options.keep_existing(Family::Device))?;
        }

        Ok(())
    }
}
