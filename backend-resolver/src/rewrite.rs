use crate::updater::BackendData;

/// Sets the URL the backend rewrites matched requests to.
pub(crate) fn build(d: &mut BackendData<'_>) {
    let target = d.directives.rewrite_target.as_str();
    if target.is_empty() {
        return;
    }
    // The target is rendered unquoted into the load balancer's configuration.
    if target.contains(|c: char| c.is_whitespace() || c == '"' || c == '\'') {
        let src = d.log.source();
        d.log.warn(format_args!(
            "rewrite-target does not allow white spaces or single/double quotes on {src}"
        ));
        return;
    }
    d.backend.rewrite_url = Some(target.to_string());
}
