// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Android platform bridge via JNI.
//
// ## Architecture notes
//
// Runtime permission prompts, Zebra SDK Bluetooth discovery and the system
// document picker all finish in a Java callback (`onRequestPermissionsResult`,
// `DiscoveryHandler`, `onActivityResult`). The host app ships a small glue
// class, `dev.zebraprint.ZebraBridge`, that starts each operation and reports
// the result through the `Java_dev_zebraprint_ZebraBridge_on*` functions
// exported below. Each of those completes a `PendingCall` that the awaiting
// future holds. See `ANDROID-INTEGRATION.md` for the glue contract.
//
// Printing needs no glue: the Zebra SDK connection and printer objects are
// driven directly over JNI from a blocking thread through `JniZebraLink`.

#![cfg(target_os = "android")]

mod link;

use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::Duration;

use jni::objects::{JClass, JIntArray, JObject, JObjectArray, JString, JValue};
use jni::sys::{jint, jlong};
use jni::{JNIEnv, JavaVM};
use tracing::{debug, info, warn};

use zebraprint_core::error::{Result, ZebraPrintError};
use zebraprint_core::types::{
    Permission, PermissionGrants, PermissionStatus, PickOutcome, PickRequest, PickedFile,
};
use zebraprint_print::pdf_job::{DEFAULT_SETTLE_DELAY, PdfJob};
use zebraprint_print::test_label;

use crate::pending::PendingCall;
use crate::traits::*;

use link::JniZebraLink;

/// Host-side glue class (binary name).
const GLUE_CLASS: &str = "dev.zebraprint.ZebraBridge";

/// Result codes the glue reports per permission.
const PERMISSION_GRANTED: jint = 0;
const PERMISSION_NEVER_ASK_AGAIN: jint = -2;

static PERMISSIONS: PendingCall<PermissionGrants> = PendingCall::new("permission request");
static DISCOVERY: PendingCall<std::result::Result<String, String>> =
    PendingCall::new("printer discovery");
static PICKER: PendingCall<std::result::Result<PickOutcome, String>> =
    PendingCall::new("document picker");

static VM: OnceLock<JavaVM> = OnceLock::new();

// ---------------------------------------------------------------------------
// JNI bootstrap helpers
// ---------------------------------------------------------------------------

fn java_vm() -> Result<&'static JavaVM> {
    if let Some(vm) = VM.get() {
        return Ok(vm);
    }
    let ctx = ndk_context::android_context();
    // SAFETY: `ctx.vm()` returns the `JavaVM*` set by the NDK glue code and
    // stays valid for the lifetime of the process.
    let vm = unsafe { JavaVM::from_raw(ctx.vm().cast()) }
        .map_err(|e| ZebraPrintError::Bridge(format!("failed to obtain JavaVM: {e}")))?;
    Ok(VM.get_or_init(|| vm))
}

/// Attach the current thread (once) and return its environment.
pub(crate) fn jni_env() -> Result<JNIEnv<'static>> {
    java_vm()?
        .attach_current_thread_permanently()
        .map_err(|e| ZebraPrintError::Bridge(format!("failed to attach JNI thread: {e}")))
}

/// The hosting `Activity`.
pub(crate) fn activity() -> Result<JObject<'static>> {
    let ctx = ndk_context::android_context();
    let ptr = ctx.context();
    if ptr.is_null() {
        return Err(ZebraPrintError::Bridge(
            "Android context is null — native activity not initialised".into(),
        ));
    }
    // SAFETY: the NDK guarantees this pointer is a valid global jobject for
    // the hosting Activity.
    Ok(unsafe { JObject::from_raw(ptr.cast()) })
}

/// Local references one bridge operation may hold at once.
const LOCAL_FRAME_CAPACITY: i32 = 32;

/// Run `f` inside its own JNI local frame.
///
/// Threads are attached permanently and never return into Java, so local
/// references are only released when a frame is popped.
pub(crate) fn in_local_frame<T>(
    env: &mut JNIEnv<'_>,
    f: impl FnOnce(&mut JNIEnv<'_>) -> Result<T>,
) -> Result<T> {
    env.with_local_frame(LOCAL_FRAME_CAPACITY, |env| {
        Ok::<_, jni::errors::Error>(f(env))
    })
    .map_err(|e| ZebraPrintError::Bridge(format!("JNI local frame: {e}")))?
}

/// Map a failed JNI call into `Bridge`, clearing any pending Java exception
/// and keeping its message.
pub(crate) fn jni_err(env: &mut JNIEnv<'_>, context: &str, e: jni::errors::Error) -> ZebraPrintError {
    match take_exception_message(env) {
        Some(message) => ZebraPrintError::Bridge(format!("{context}: {message}")),
        None => ZebraPrintError::Bridge(format!("{context}: {e}")),
    }
}

/// Clear a pending Java exception and return its `getMessage()`.
pub(crate) fn take_exception_message(env: &mut JNIEnv<'_>) -> Option<String> {
    if !env.exception_check().unwrap_or(false) {
        return None;
    }
    let throwable = env.exception_occurred().ok()?;
    env.exception_clear().ok()?;

    let message = env
        .call_method(&throwable, "getMessage", "()Ljava/lang/String;", &[])
        .ok()?
        .l()
        .ok()?;
    if message.is_null() {
        return Some("unknown Java exception".into());
    }
    env.get_string(&JString::from(message)).ok().map(Into::into)
}

/// Load an application class through the Activity's class loader.
///
/// `FindClass` on a natively attached thread only sees system classes, so
/// both the glue class and the Zebra SDK classes go through here.
pub(crate) fn load_class<'local>(
    env: &mut JNIEnv<'local>,
    activity: &JObject<'_>,
    binary_name: &str,
) -> Result<JClass<'local>> {
    let loader = env
        .call_method(activity, "getClassLoader", "()Ljava/lang/ClassLoader;", &[])
        .and_then(|v| v.l())
        .map_err(|e| jni_err(env, "getClassLoader", e))?;
    let name = env
        .new_string(binary_name)
        .map_err(|e| jni_err(env, "new_string(class name)", e))?;
    let class = env
        .call_method(
            &loader,
            "loadClass",
            "(Ljava/lang/String;)Ljava/lang/Class;",
            &[JValue::Object(&name)],
        )
        .and_then(|v| v.l())
        .map_err(|e| jni_err(env, binary_name, e))?;
    Ok(JClass::from(class))
}

fn opt_string(env: &mut JNIEnv<'_>, value: &JString<'_>) -> Option<String> {
    if value.is_null() {
        return None;
    }
    env.get_string(value).ok().map(Into::into)
}

// ---------------------------------------------------------------------------
// Bridge struct
// ---------------------------------------------------------------------------

/// Android implementation of the Zebraprint platform bridge.
pub struct AndroidBridge {
    settle_delay: Duration,
}

impl AndroidBridge {
    /// Create a new Android bridge. No JNI call happens until a trait
    /// method is invoked.
    pub fn new() -> Self {
        Self {
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }

    /// Pause between the end of a PDF transfer and closing the connection.
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }
}

impl Default for AndroidBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformBridge for AndroidBridge {
    fn platform_name(&self) -> &str {
        "Android"
    }

    fn supports_printing(&self) -> bool {
        true
    }
}

// ---------------------------------------------------------------------------
// PermissionService — Activity.requestPermissions via glue
// ---------------------------------------------------------------------------

impl PermissionService for AndroidBridge {
    async fn request_permissions(&self, permissions: &[Permission]) -> Result<PermissionGrants> {
        let reply = PERMISSIONS.arm()?;
        if let Err(e) = start_permission_request(permissions) {
            PERMISSIONS.disarm();
            return Err(e);
        }
        reply.wait().await
    }
}

fn start_permission_request(permissions: &[Permission]) -> Result<()> {
    let mut env = jni_env()?;
    let activity = activity()?;
    in_local_frame(&mut env, |env| {
        let glue = load_class(env, &activity, GLUE_CLASS)?;

        let names = env
            .new_object_array(permissions.len() as i32, "java/lang/String", JObject::null())
            .map_err(|e| jni_err(env, "new String[]", e))?;
        for (i, permission) in permissions.iter().enumerate() {
            let name = env
                .new_string(permission.android_name())
                .map_err(|e| jni_err(env, "new_string(permission)", e))?;
            env.set_object_array_element(&names, i as i32, &name)
                .map_err(|e| jni_err(env, "String[] store", e))?;
        }

        info!(count = permissions.len(), "Android: requesting runtime permissions");
        env.call_static_method(
            &glue,
            "requestPermissions",
            "(Landroid/app/Activity;[Ljava/lang/String;)V",
            &[JValue::Object(&activity), JValue::Object(&names)],
        )
        .map_err(|e| jni_err(env, "ZebraBridge.requestPermissions", e))?;
        Ok(())
    })
}

/// Called by the glue from `onRequestPermissionsResult`.
#[unsafe(no_mangle)]
pub extern "system" fn Java_dev_zebraprint_ZebraBridge_onPermissionsResult<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    permissions: JObjectArray<'local>,
    results: JIntArray<'local>,
) {
    let len = env.get_array_length(&permissions).unwrap_or(0);
    let mut codes = vec![0 as jint; len.max(0) as usize];
    if env.get_int_array_region(&results, 0, &mut codes).is_err() {
        warn!("Android: unreadable permission results, treating all as denied");
        codes.fill(-1);
    }

    let mut grants = PermissionGrants::new();
    for (i, code) in codes.iter().enumerate() {
        let Ok(element) = env.get_object_array_element(&permissions, i as i32) else {
            continue;
        };
        let Some(name) = opt_string(&mut env, &JString::from(element)) else {
            continue;
        };
        let Some(permission) = Permission::from_android_name(&name) else {
            debug!(permission = %name, "Android: ignoring unrequested permission");
            continue;
        };
        let status = match *code {
            PERMISSION_GRANTED => PermissionStatus::Granted,
            PERMISSION_NEVER_ASK_AGAIN => PermissionStatus::NeverAskAgain,
            _ => PermissionStatus::Denied,
        };
        grants.insert(permission, status);
    }

    PERMISSIONS.complete(grants);
}

// ---------------------------------------------------------------------------
// NativeDiscovery — BluetoothDiscoverer.findPrinters via glue
// ---------------------------------------------------------------------------

impl NativeDiscovery for AndroidBridge {
    async fn discover_printers(&self) -> Result<String> {
        let reply = DISCOVERY.arm()?;
        if let Err(e) = start_discovery() {
            DISCOVERY.disarm();
            return Err(e);
        }
        reply.wait().await?.map_err(ZebraPrintError::Discovery)
    }
}

fn start_discovery() -> Result<()> {
    let mut env = jni_env()?;
    let activity = activity()?;
    in_local_frame(&mut env, |env| {
        let glue = load_class(env, &activity, GLUE_CLASS)?;

        info!("Android: starting Bluetooth printer discovery");
        env.call_static_method(
            &glue,
            "startDiscovery",
            "(Landroid/content/Context;)V",
            &[JValue::Object(&activity)],
        )
        .map_err(|e| jni_err(env, "ZebraBridge.startDiscovery", e))?;
        Ok(())
    })
}

/// Called by the glue from `DiscoveryHandler.discoveryFinished` (with the
/// JSON payload) or `discoveryError` (with the error text).
#[unsafe(no_mangle)]
pub extern "system" fn Java_dev_zebraprint_ZebraBridge_onDiscoveryFinished<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    error: JString<'local>,
    payload: JString<'local>,
) {
    let outcome = match (opt_string(&mut env, &error), opt_string(&mut env, &payload)) {
        (Some(error), _) => Err(error),
        (None, Some(payload)) => Ok(payload),
        (None, None) => Err("Discovery finished without a result".to_string()),
    };
    DISCOVERY.complete(outcome);
}

// ---------------------------------------------------------------------------
// DocumentPicker — ACTION_OPEN_DOCUMENT via glue
// ---------------------------------------------------------------------------

impl DocumentPicker for AndroidBridge {
    async fn pick_document(&self, request: &PickRequest) -> Result<PickOutcome> {
        let reply = PICKER.arm()?;
        if let Err(e) = start_picker(request) {
            PICKER.disarm();
            return Err(e);
        }
        reply.wait().await?.map_err(ZebraPrintError::PickFailed)
    }
}

fn start_picker(request: &PickRequest) -> Result<()> {
    let mut env = jni_env()?;
    let activity = activity()?;
    in_local_frame(&mut env, |env| {
        let glue = load_class(env, &activity, GLUE_CLASS)?;

        let mime = env
            .new_string(request.mime_type)
            .map_err(|e| jni_err(env, "new_string(mime)", e))?;

        info!(mime = request.mime_type, "Android: launching document picker");
        env.call_static_method(
            &glue,
            "pickDocument",
            "(Landroid/app/Activity;Ljava/lang/String;Z)V",
            &[
                JValue::Object(&activity),
                JValue::Object(&mime),
                JValue::Bool(u8::from(request.copy_to_cache)),
            ],
        )
        .map_err(|e| jni_err(env, "ZebraBridge.pickDocument", e))?;
        Ok(())
    })
}

/// Called by the glue from `onActivityResult`. A null `uri` with a null
/// `error` means the user backed out.
#[unsafe(no_mangle)]
pub extern "system" fn Java_dev_zebraprint_ZebraBridge_onDocumentPicked<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    uri: JString<'local>,
    name: JString<'local>,
    size: jlong,
    error: JString<'local>,
) {
    let outcome = match (opt_string(&mut env, &error), opt_string(&mut env, &uri)) {
        (Some(error), _) => Err(error),
        (None, None) => Ok(PickOutcome::Cancelled),
        (None, Some(uri)) => {
            let name = opt_string(&mut env, &name).unwrap_or_else(|| "document.pdf".into());
            Ok(PickOutcome::Picked(PickedFile {
                uri,
                name,
                size: u64::try_from(size).ok(),
            }))
        }
    };
    PICKER.complete(outcome);
}

// ---------------------------------------------------------------------------
// NativePrint — Zebra SDK over JNI on a blocking thread
// ---------------------------------------------------------------------------

impl NativePrint for AndroidBridge {
    async fn print_pdf(&self, file: &PickedFile, address: &str) -> Result<()> {
        let uri = file.uri.clone();
        let address = address.to_owned();
        let settle_delay = self.settle_delay;

        tokio::task::spawn_blocking(move || {
            let staged = StagedDocument::from_uri(&uri)?;
            let mut link = JniZebraLink::new(&address)?;
            PdfJob::new(staged.path.clone())
                .with_settle_delay(settle_delay)
                .run(&mut link)
                .map_err(into_print_error)
        })
        .await
        .map_err(|e| ZebraPrintError::Bridge(format!("print task failed: {e}")))?
    }

    async fn print_test_label(&self, address: &str) -> Result<()> {
        let address = address.to_owned();
        tokio::task::spawn_blocking(move || {
            let mut link = JniZebraLink::new(&address)?;
            test_label::print_test_label(&mut link).map_err(into_print_error)
        })
        .await
        .map_err(|e| ZebraPrintError::Bridge(format!("test label task failed: {e}")))?
    }
}

/// SDK exceptions surface to the user as their message.
fn into_print_error(err: ZebraPrintError) -> ZebraPrintError {
    match err {
        ZebraPrintError::Bridge(detail) => ZebraPrintError::Print(detail),
        other => other,
    }
}

/// A picked document materialised as a file path the SDK can read.
///
/// `content://` URIs are copied into the cache directory and removed again
/// when the job is done; `file://` URIs are used in place.
struct StagedDocument {
    path: PathBuf,
    temporary: bool,
}

impl StagedDocument {
    fn from_uri(uri: &str) -> Result<Self> {
        if let Some(path) = uri.strip_prefix("file://") {
            return Ok(Self {
                path: PathBuf::from(path),
                temporary: false,
            });
        }

        let mut env = jni_env()?;
        let activity = activity()?;
        let (bytes, cache) = in_local_frame(&mut env, |env| {
            Ok((read_content_uri(env, &activity, uri)?, cache_dir(env, &activity)?))
        })?;

        let path = cache.join(format!("zebraprint-{}.pdf", uuid::Uuid::new_v4()));
        std::fs::write(&path, &bytes)?;
        info!(uri, path = %path.display(), bytes = bytes.len(), "Android: staged document");
        Ok(Self {
            path,
            temporary: true,
        })
    }
}

impl Drop for StagedDocument {
    fn drop(&mut self) {
        if !self.temporary {
            return;
        }
        if let Err(e) = std::fs::remove_file(&self.path) {
            warn!(path = %self.path.display(), error = %e, "failed to remove staged document");
        }
    }
}

fn cache_dir(env: &mut JNIEnv<'_>, activity: &JObject<'_>) -> Result<PathBuf> {
    let dir = env
        .call_method(activity, "getCacheDir", "()Ljava/io/File;", &[])
        .and_then(|v| v.l())
        .map_err(|e| jni_err(env, "getCacheDir", e))?;
    let path = env
        .call_method(&dir, "getAbsolutePath", "()Ljava/lang/String;", &[])
        .and_then(|v| v.l())
        .map_err(|e| jni_err(env, "getAbsolutePath", e))?;
    let path: String = env
        .get_string(&JString::from(path))
        .map_err(|e| jni_err(env, "getAbsolutePath->String", e))?
        .into();
    Ok(PathBuf::from(path))
}

/// Read a `content://` URI through the `ContentResolver`.
fn read_content_uri(env: &mut JNIEnv<'_>, activity: &JObject<'_>, uri: &str) -> Result<Vec<u8>> {
    let j_uri_string = env
        .new_string(uri)
        .map_err(|e| jni_err(env, "new_string(uri)", e))?;
    let j_uri = env
        .call_static_method(
            "android/net/Uri",
            "parse",
            "(Ljava/lang/String;)Landroid/net/Uri;",
            &[JValue::Object(&j_uri_string)],
        )
        .and_then(|v| v.l())
        .map_err(|e| jni_err(env, "Uri.parse", e))?;

    let resolver = env
        .call_method(
            activity,
            "getContentResolver",
            "()Landroid/content/ContentResolver;",
            &[],
        )
        .and_then(|v| v.l())
        .map_err(|e| jni_err(env, "getContentResolver", e))?;

    let input = env
        .call_method(
            &resolver,
            "openInputStream",
            "(Landroid/net/Uri;)Ljava/io/InputStream;",
            &[JValue::Object(&j_uri)],
        )
        .and_then(|v| v.l())
        .map_err(|e| jni_err(env, "openInputStream", e))?;
    if input.is_null() {
        return Err(ZebraPrintError::Print(format!("cannot open {uri}")));
    }

    let buffer = env
        .new_byte_array(4 * 1024)
        .map_err(|e| jni_err(env, "new_byte_array", e))?;
    let mut bytes = Vec::new();
    let mut chunk = vec![0i8; 4 * 1024];

    let read_result = loop {
        let read = match env
            .call_method(&input, "read", "([B)I", &[JValue::Object(&buffer)])
            .and_then(|v| v.i())
        {
            Ok(n) => n,
            Err(e) => break Err(jni_err(env, "InputStream.read", e)),
        };
        if read < 0 {
            break Ok(());
        }
        let n = read as usize;
        if let Err(e) = env.get_byte_array_region(&buffer, 0, &mut chunk[..n]) {
            break Err(jni_err(env, "get_byte_array_region", e));
        }
        bytes.extend(chunk[..n].iter().map(|b| *b as u8));
    };

    if let Err(e) = env.call_method(&input, "close", "()V", &[]) {
        warn!(error = %jni_err(env, "InputStream.close", e), "Android: closing input stream failed");
    }
    read_result?;

    debug!(uri, bytes = bytes.len(), "Android: read content URI");
    Ok(bytes)
}
