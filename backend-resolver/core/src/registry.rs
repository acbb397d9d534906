use ahash::AHashMap as HashMap;
use serde::{Deserialize, Serialize};

/// Looks up and registers userlists.
///
/// Userlists are shared by every backend that references the same secret, so registration is
/// idempotent: callers look a list up before building a new one.
pub trait UserlistStore {
    fn find_userlist(&self, name: &str) -> Option<&Userlist>;

    fn add_userlist(&mut self, name: String, users: Vec<User>) -> &Userlist;
}

/// Exposes the virtual hosts resolved so far, in registration order.
pub trait RouteTable {
    fn hosts(&self) -> &[Host];
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct User {
    pub name: String,
    pub passwd: String,
    pub encrypted: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Userlist {
    pub name: String,
    pub users: Vec<User>,
}

/// Identifies a backend that a path routes to.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct BackendRef {
    pub namespace: String,
    pub name: String,
    pub port: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Host {
    pub hostname: String,
    #[serde(default)]
    pub paths: Vec<HostPath>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct HostPath {
    pub path: String,
    pub backend: BackendRef,
}

/// Holds the hosts and userlists registered during one reconciliation pass.
#[derive(Debug, Default)]
pub struct Registry {
    hosts: Vec<Host>,
    host_idx: HashMap<String, usize>,

    userlists: Vec<Userlist>,
    userlist_idx: HashMap<String, usize>,
}

// === impl BackendRef ===

impl BackendRef {
    pub fn new(namespace: impl ToString, name: impl ToString, port: impl ToString) -> Self {
        Self {
            namespace: namespace.to_string(),
            name: name.to_string(),
            port: port.to_string(),
        }
    }

    /// The name the load balancer knows this backend by.
    pub fn id(&self) -> String {
        format!("{}_{}_{}", self.namespace, self.name, self.port)
    }
}

// === impl Host ===

impl Host {
    pub fn add_path(&mut self, backend: BackendRef, path: impl ToString) -> &mut Self {
        self.paths.push(HostPath {
            path: path.to_string(),
            backend,
        });
        self
    }
}

// === impl Registry ===

impl Registry {
    /// Returns the host named `hostname`, registering it if it does not exist yet.
    pub fn acquire_host(&mut self, hostname: &str) -> &mut Host {
        let idx = match self.host_idx.get(hostname) {
            Some(idx) => *idx,
            None => {
                self.hosts.push(Host {
                    hostname: hostname.to_string(),
                    paths: vec![],
                });
                let idx = self.hosts.len() - 1;
                self.host_idx.insert(hostname.to_string(), idx);
                idx
            }
        };
        &mut self.hosts[idx]
    }

    /// Registers every path of `host`, merging with an already registered host of the same name.
    pub fn add_host(&mut self, host: Host) {
        let Host { hostname, paths } = host;
        self.acquire_host(&hostname).paths.extend(paths);
    }

    pub fn userlists(&self) -> &[Userlist] {
        &self.userlists
    }
}

impl UserlistStore for Registry {
    fn find_userlist(&self, name: &str) -> Option<&Userlist> {
        self.userlist_idx.get(name).map(|idx| &self.userlists[*idx])
    }

    fn add_userlist(&mut self, name: String, users: Vec<User>) -> &Userlist {
        if let Some(idx) = self.userlist_idx.get(&name) {
            return &self.userlists[*idx];
        }
        self.userlists.push(Userlist {
            name: name.clone(),
            users,
        });
        let idx = self.userlists.len() - 1;
        self.userlist_idx.insert(name, idx);
        &self.userlists[idx]
    }
}

impl RouteTable for Registry {
    fn hosts(&self) -> &[Host] {
        &self.hosts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn userlists_are_registered_once() {
        let mut registry = Registry::default();
        assert!(registry.find_userlist("default_mypwd").is_none());

        let users = vec![User {
            name: "usr1".into(),
            passwd: "encpwd1".into(),
            encrypted: true,
        }];
        registry.add_userlist("default_mypwd".into(), users.clone());
        let list = registry.add_userlist("default_mypwd".into(), vec![]);
        assert_eq!(list.users, users, "first registration must be kept");

        assert_eq!(registry.userlists().len(), 1);
        assert_eq!(
            registry.find_userlist("default_mypwd").map(|l| l.name.as_str()),
            Some("default_mypwd")
        );
    }

    #[test]
    fn hosts_keep_registration_order() {
        let mut registry = Registry::default();
        let back = BackendRef::new("default", "back", 8080);
        registry
            .acquire_host("b.local")
            .add_path(back.clone(), "/app");
        registry.acquire_host("a.local").add_path(back.clone(), "/");
        registry.add_host(Host {
            hostname: "b.local".into(),
            paths: vec![HostPath {
                path: "/oauth2".into(),
                backend: back.clone(),
            }],
        });

        let hosts = registry.hosts();
        assert_eq!(
            hosts.iter().map(|h| h.hostname.as_str()).collect::<Vec<_>>(),
            ["b.local", "a.local"]
        );
        assert_eq!(
            hosts[0].paths.iter().map(|p| p.path.as_str()).collect::<Vec<_>>(),
            ["/app", "/oauth2"]
        );
        assert_eq!(back.id(), "default_back_8080");
    }
}
