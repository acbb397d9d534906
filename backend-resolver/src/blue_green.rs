use crate::{updater::BackendData, weights};
use ingress_backend_resolver_core::{
    backend::MAX_WEIGHT, CacheError, ClusterCache, Endpoint, Labels,
};
use std::num::ParseIntError;

/// A labeled group of endpoints sharing a declared weight.
#[derive(Debug)]
struct DeployGroup<'a> {
    label_name: &'a str,
    label_value: &'a str,
    weight: u32,

    /// Indexes into the backend's endpoints.
    endpoints: Vec<usize>,
}

#[derive(Debug, thiserror::Error)]
enum WeightError {
    #[error("invalid weight format: {0}")]
    Format(String),

    #[error("invalid weight value '{value}': {source}")]
    Value {
        value: String,
        #[source]
        source: ParseIntError,
    },
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
enum RebalanceError {
    #[error("weights of {groups} deployment groups overflow when shared between their endpoints")]
    Overflow { groups: usize },
}

#[derive(Debug, thiserror::Error)]
enum PodError {
    #[error("endpoint does not reference a pod")]
    NoTargetRef,

    #[error(transparent)]
    Cache(#[from] CacheError),
}

/// Splits traffic across labeled deployment groups.
///
/// In `pod` mode every endpoint of a group receives the group's declared weight. In `deploy`
/// mode (the default) the declared weight is the share of the group as a whole, divided evenly
/// between its endpoints.
pub(crate) fn build(d: &mut BackendData<'_>, cache: &dyn ClusterCache) {
    let ann = d.directives;
    let src = d.log.source();
    let balance = match (ann.blue_green_balance.as_str(), ann.blue_green_deploy.as_str()) {
        ("", "") => return,
        ("", deploy) => deploy,
        (balance, _) => balance,
    };

    let mut groups = Vec::new();
    for triple in balance.split(',') {
        let (group, declared) = match parse_group(triple) {
            Ok(group) => group,
            Err(error) => {
                d.log.error(format_args!(
                    "blue/green config on {src} has an {error}"
                ));
                return;
            }
        };
        if declared < 0 {
            d.log.warn(format_args!(
                "invalid weight '{declared}' on {src}, using '0' instead"
            ));
        } else if declared > i64::from(MAX_WEIGHT) {
            d.log.warn(format_args!(
                "invalid weight '{declared}' on {src}, using '{MAX_WEIGHT}' instead"
            ));
        }
        groups.push(group);
    }

    for (idx, ep) in d.backend.endpoints.iter_mut().enumerate() {
        if ep.weight == 0 {
            // Draining endpoints don't take part in the balance.
            continue;
        }

        let mut matched = false;
        match pod_labels(cache, ep) {
            Ok(labels) => {
                for group in groups.iter_mut() {
                    if labels.has(group.label_name, group.label_value) {
                        // Stands unless the group weights are recomputed below.
                        ep.weight = group.weight;
                        group.endpoints.push(idx);
                        matched = true;
                    }
                }
            }
            Err(error) => {
                d.log.warn(format_args!(
                    "endpoint '{ep}' on {src} was removed from balance: {error}"
                ));
            }
        }
        if !matched {
            // Stop new traffic without removing the endpoint from the backend.
            ep.weight = 0;
        }
    }

    for group in groups.iter().filter(|g| g.endpoints.is_empty()) {
        d.log.info_v(
            3,
            format_args!(
                "blue/green balance label '{}={}' on {src} does not reference any endpoint",
                group.label_name, group.label_value
            ),
        );
    }

    match ann.blue_green_mode.as_str() {
        "pod" => return,
        "" | "deploy" => {}
        mode => {
            d.log.warn(format_args!(
                "unsupported blue/green mode '{mode}' on {src}, falling back to 'deploy'"
            ));
        }
    }

    if let Err(error) = rebalance(&groups, &mut d.backend.endpoints) {
        d.log.error(format_args!(
            "blue/green config on {src} cannot be rebalanced: {error}"
        ));
    }
}

/// Parses a `name=value=weight` group, returning it with its declared (unclamped) weight.
fn parse_group(triple: &str) -> Result<(DeployGroup<'_>, i64), WeightError> {
    let parts = triple.split('=').collect::<Vec<_>>();
    let [label_name, label_value, weight] = parts[..] else {
        return Err(WeightError::Format(triple.to_string()));
    };
    let declared = weight
        .parse::<i64>()
        .map_err(|source| WeightError::Value {
            value: weight.to_string(),
            source,
        })?;
    let group = DeployGroup {
        label_name,
        label_value,
        weight: declared.clamp(0, i64::from(MAX_WEIGHT)) as u32,
        endpoints: vec![],
    };
    Ok((group, declared))
}

fn pod_labels(cache: &dyn ClusterCache, ep: &Endpoint) -> Result<Labels, PodError> {
    let target = ep
        .target_ref
        .as_deref()
        .filter(|t| !t.is_empty())
        .ok_or(PodError::NoTargetRef)?;
    Ok(cache.pod_labels(target)?)
}

/// Recomputes endpoint weights so that each group's declared weight is shared evenly by its
/// endpoints.
///
/// Group weights are scaled to the least common multiple of the group sizes so that every
/// per-endpoint share is an integer, then reduced by their greatest common divisor. Nothing is
/// written when the scaled weights do not fit in a `u64`.
fn rebalance(
    groups: &[DeployGroup<'_>],
    endpoints: &mut [Endpoint],
) -> Result<(), RebalanceError> {
    let overflow = || RebalanceError::Overflow {
        groups: groups.len(),
    };
    let lcm_count = groups
        .iter()
        .map(|g| g.endpoints.len() as u64)
        .filter(|count| *count > 0)
        .try_fold(0, |acc, count| {
            if acc == 0 {
                Some(count)
            } else {
                weights::lcm(acc, count)
            }
        })
        .ok_or_else(overflow)?;
    if lcm_count == 0 {
        // No group references an endpoint.
        return Ok(());
    }

    let group_weights = groups
        .iter()
        .map(|g| match g.endpoints.len() as u64 {
            0 => Some(0),
            count => u64::from(g.weight)
                .checked_mul(lcm_count)
                .map(|w| w / count),
        })
        .collect::<Option<Vec<_>>>()
        .ok_or_else(overflow)?;
    let (gcd, max) = group_weights
        .iter()
        .filter(|w| **w > 0)
        .fold((0, 0), |(gcd, max), w| (weights::gcd(gcd, *w), max.max(*w)));
    if gcd == 0 {
        // Every referenced group has a zero weight.
        return Ok(());
    }

    for (group, group_weight) in groups.iter().zip(group_weights) {
        let weight = weights::fit(group_weight, gcd, max);
        for idx in &group.endpoints {
            endpoints[*idx].weight = weight;
        }
    }
    Ok(())
}
