// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// `PrinterLink` over the Zebra Link-OS SDK, driven through JNI.
//
// Every method blocks on Bluetooth I/O inside the SDK; only call from a
// blocking thread.

use std::path::Path;

use jni::objects::{GlobalRef, JObject, JString, JValue};
use jni::JNIEnv;
use tracing::debug;

use zebraprint_core::error::Result;
use zebraprint_core::types::{PrinterLanguage, PrinterStatus};
use zebraprint_print::link::PrinterLink;

use super::{activity, in_local_frame, jni_env, jni_err, load_class};

const BLUETOOTH_CONNECTION: &str = "com.zebra.sdk.comm.BluetoothConnection";
const SGD: &str = "com.zebra.sdk.printer.SGD";
const PRINTER_FACTORY: &str = "com.zebra.sdk.printer.ZebraPrinterFactory";

pub(crate) struct JniZebraLink {
    address: String,
    env: JNIEnv<'static>,
    activity: JObject<'static>,
    connection: GlobalRef,
    printer: Option<GlobalRef>,
}

impl JniZebraLink {
    /// Create (but do not open) a Bluetooth connection to `address`.
    pub(crate) fn new(address: &str) -> Result<Self> {
        let mut env = jni_env()?;
        let activity = activity()?;

        let connection = in_local_frame(&mut env, |env| {
            let class = load_class(env, &activity, BLUETOOTH_CONNECTION)?;
            let j_address = env
                .new_string(address)
                .map_err(|e| jni_err(env, "new_string(address)", e))?;
            let connection = env
                .new_object(&class, "(Ljava/lang/String;)V", &[JValue::Object(&j_address)])
                .map_err(|e| jni_err(env, "new BluetoothConnection", e))?;
            env.new_global_ref(connection)
                .map_err(|e| jni_err(env, "new_global_ref(connection)", e))
        })?;

        Ok(Self {
            address: address.to_owned(),
            env,
            activity,
            connection,
            printer: None,
        })
    }

    /// `ZebraPrinterFactory.getInstance(connection)`, created on first use.
    fn printer(&mut self) -> Result<GlobalRef> {
        if let Some(printer) = &self.printer {
            return Ok(printer.clone());
        }
        let (activity, connection) = (&self.activity, &self.connection);
        let printer = in_local_frame(&mut self.env, |env| {
            let factory = load_class(env, activity, PRINTER_FACTORY)?;
            let printer = env
                .call_static_method(
                    &factory,
                    "getInstance",
                    "(Lcom/zebra/sdk/comm/Connection;)Lcom/zebra/sdk/printer/ZebraPrinter;",
                    &[JValue::Object(connection.as_obj())],
                )
                .and_then(|v| v.l())
                .map_err(|e| jni_err(env, "ZebraPrinterFactory.getInstance", e))?;
            env.new_global_ref(printer)
                .map_err(|e| jni_err(env, "new_global_ref(printer)", e))
        })?;
        self.printer = Some(printer.clone());
        Ok(printer)
    }

    fn bool_field(env: &mut JNIEnv<'_>, status: &JObject<'_>, name: &str) -> Result<bool> {
        env.get_field(status, name, "Z")
            .and_then(|v| v.z())
            .map_err(|e| jni_err(env, name, e))
    }
}

impl PrinterLink for JniZebraLink {
    fn address(&self) -> &str {
        &self.address
    }

    fn open(&mut self) -> Result<()> {
        debug!(address = %self.address, "opening Bluetooth connection");
        let connection = &self.connection;
        in_local_frame(&mut self.env, |env| {
            env.call_method(connection.as_obj(), "open", "()V", &[])
                .map_err(|e| jni_err(env, "Connection.open", e))?;
            Ok(())
        })
    }

    fn get_setting(&mut self, key: &str) -> Result<String> {
        let (activity, connection) = (&self.activity, &self.connection);
        in_local_frame(&mut self.env, |env| {
            let sgd = load_class(env, activity, SGD)?;
            let j_key = env
                .new_string(key)
                .map_err(|e| jni_err(env, "new_string(key)", e))?;
            let value = env
                .call_static_method(
                    &sgd,
                    "GET",
                    "(Ljava/lang/String;Lcom/zebra/sdk/comm/Connection;)Ljava/lang/String;",
                    &[JValue::Object(&j_key), JValue::Object(connection.as_obj())],
                )
                .and_then(|v| v.l())
                .map_err(|e| jni_err(env, "SGD.GET", e))?;
            if value.is_null() {
                return Ok(String::new());
            }
            let value: String = env
                .get_string(&JString::from(value))
                .map_err(|e| jni_err(env, "SGD.GET->String", e))?
                .into();
            // SGD answers are quoted on some firmware
            Ok(value.trim().trim_matches('"').to_owned())
        })
    }

    fn current_status(&mut self) -> Result<PrinterStatus> {
        let printer = self.printer()?;
        in_local_frame(&mut self.env, |env| {
            let status = env
                .call_method(
                    printer.as_obj(),
                    "getCurrentStatus",
                    "()Lcom/zebra/sdk/printer/PrinterStatus;",
                    &[],
                )
                .and_then(|v| v.l())
                .map_err(|e| jni_err(env, "ZebraPrinter.getCurrentStatus", e))?;

            Ok(PrinterStatus {
                ready_to_print: Self::bool_field(env, &status, "isReadyToPrint")?,
                paused: Self::bool_field(env, &status, "isPaused")?,
                head_open: Self::bool_field(env, &status, "isHeadOpen")?,
                paper_out: Self::bool_field(env, &status, "isPaperOut")?,
            })
        })
    }

    fn control_language(&mut self) -> Result<PrinterLanguage> {
        let printer = self.printer()?;
        in_local_frame(&mut self.env, |env| {
            let language = env
                .call_method(
                    printer.as_obj(),
                    "getPrinterControlLanguage",
                    "()Lcom/zebra/sdk/printer/PrinterLanguage;",
                    &[],
                )
                .and_then(|v| v.l())
                .map_err(|e| jni_err(env, "ZebraPrinter.getPrinterControlLanguage", e))?;
            let name = env
                .call_method(&language, "name", "()Ljava/lang/String;", &[])
                .and_then(|v| v.l())
                .map_err(|e| jni_err(env, "PrinterLanguage.name", e))?;
            let name: String = env
                .get_string(&JString::from(name))
                .map_err(|e| jni_err(env, "PrinterLanguage.name->String", e))?
                .into();

            Ok(match name.as_str() {
                "ZPL" => PrinterLanguage::Zpl,
                "CPCL" => PrinterLanguage::Cpcl,
                "LINE_PRINT" => PrinterLanguage::LinePrint,
                _ => PrinterLanguage::Unknown,
            })
        })
    }

    fn send_file(&mut self, path: &Path, progress: &mut dyn FnMut(u64, u64)) -> Result<()> {
        let total = std::fs::metadata(path)?.len();
        let printer = self.printer()?;
        in_local_frame(&mut self.env, |env| {
            let j_path = env
                .new_string(path.to_string_lossy())
                .map_err(|e| jni_err(env, "new_string(path)", e))?;

            // the SDK reports progress only through a Java ProgressMonitor, so
            // the transfer is observed at its two ends
            progress(0, total);
            env.call_method(
                printer.as_obj(),
                "sendFileContents",
                "(Ljava/lang/String;)V",
                &[JValue::Object(&j_path)],
            )
            .map_err(|e| jni_err(env, "ZebraPrinter.sendFileContents", e))?;
            progress(total, total);
            Ok(())
        })
    }

    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        let connection = &self.connection;
        in_local_frame(&mut self.env, |env| {
            let data = env
                .byte_array_from_slice(bytes)
                .map_err(|e| jni_err(env, "byte_array_from_slice", e))?;
            env.call_method(
                connection.as_obj(),
                "write",
                "([B)V",
                &[JValue::Object(&data)],
            )
            .map_err(|e| jni_err(env, "Connection.write", e))?;
            Ok(())
        })
    }

    fn close(&mut self) -> Result<()> {
        debug!(address = %self.address, "closing Bluetooth connection");
        let connection = &self.connection;
        in_local_frame(&mut self.env, |env| {
            env.call_method(connection.as_obj(), "close", "()V", &[])
                .map_err(|e| jni_err(env, "Connection.close", e))?;
            Ok(())
        })
    }
}
