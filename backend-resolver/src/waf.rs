use crate::updater::BackendData;
use ingress_backend_resolver_core::Waf;

pub(crate) fn build(d: &mut BackendData<'_>) {
    let mode = d.directives.waf.as_str();
    if mode.is_empty() {
        return;
    }
    match mode.parse::<Waf>() {
        Ok(waf) => d.backend.waf = Some(waf),
        Err(_) => {
            let src = d.log.source();
            d.log.warn(format_args!(
                "ignoring invalid WAF mode '{mode}' on {src}"
            ));
        }
    }
}
