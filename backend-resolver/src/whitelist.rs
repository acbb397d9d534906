use crate::updater::BackendData;
use ingress_backend_resolver_core::IpNet;

/// Restricts the backend to the listed source networks.
///
/// Invalid networks are dropped individually; the remaining ones keep their declared order.
pub(crate) fn build(d: &mut BackendData<'_>) {
    let ranges = d.directives.whitelist_source_range.as_str();
    if ranges.is_empty() {
        return;
    }
    let src = d.log.source();
    let log = d.log;
    d.backend.whitelist = ranges
        .split(',')
        .map(str::trim)
        .filter_map(|cidr| match cidr.parse::<IpNet>() {
            Ok(net) => Some(net),
            Err(_) => {
                log.warn(format_args!(
                    "skipping invalid cidr '{cidr}' in whitelist config on {src}"
                ));
                None
            }
        })
        .collect();
}
