//! Node.js built-in module names.
//!
//! Built-ins are never part of the workspace module graph, so the router marks
//! them external before asking the workspace anything.

/// Built-in modules importable with or without the `node:` prefix.
///
/// Kept sorted so lookups can binary search.
pub const NODE_BUILTIN_MODULES: &[&str] = &[
    "_http_agent",
    "_http_client",
    "_http_common",
    "_http_incoming",
    "_http_outgoing",
    "_http_server",
    "_stream_duplex",
    "_stream_passthrough",
    "_stream_readable",
    "_stream_transform",
    "_stream_wrap",
    "_stream_writable",
    "_tls_common",
    "_tls_wrap",
    "assert",
    "assert/strict",
    "async_hooks",
    "buffer",
    "child_process",
    "cluster",
    "console",
    "constants",
    "crypto",
    "dgram",
    "diagnostics_channel",
    "dns",
    "dns/promises",
    "domain",
    "events",
    "fs",
    "fs/promises",
    "http",
    "http2",
    "https",
    "inspector",
    "inspector/promises",
    "module",
    "net",
    "os",
    "path",
    "path/posix",
    "path/win32",
    "perf_hooks",
    "process",
    "punycode",
    "querystring",
    "readline",
    "readline/promises",
    "repl",
    "stream",
    "stream/consumers",
    "stream/promises",
    "stream/web",
    "string_decoder",
    "sys",
    "timers",
    "timers/promises",
    "tls",
    "trace_events",
    "tty",
    "url",
    "util",
    "util/types",
    "v8",
    "vm",
    "wasi",
    "worker_threads",
    "zlib",
];

/// Built-in modules that only exist behind the `node:` prefix.
pub const NODE_PREFIXED_ONLY_MODULES: &[&str] = &["sea", "sqlite", "test", "test/reporters"];

/// Check if a specifier names a Node.js built-in module.
///
/// Accepts `fs`, `node:fs`, subpaths like `fs/promises`, and prefix-only
/// modules like `node:test`. Unknown `node:` names are not built-ins.
#[must_use]
pub fn is_builtin(specifier: &str) -> bool {
    if let Some(name) = specifier.strip_prefix("node:") {
        return NODE_BUILTIN_MODULES.binary_search(&name).is_ok()
            || NODE_PREFIXED_ONLY_MODULES.contains(&name);
    }
    NODE_BUILTIN_MODULES.binary_search(&specifier).is_ok()
}
