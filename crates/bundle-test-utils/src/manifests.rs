//! Canned documents for bundle test scenarios.
//!
//! The objects form the standard lookup scenario: `pody` and `dodo` are
//! Pods in component `zork`; component `kube-proxy` holds a ServiceAccount
//! and a DaemonSet, both named `kube-proxy`.

/// Pod `pody` with two containers sharing an image.
pub const POD_PODY: &str = "\
apiVersion: v1
kind: Pod
metadata:
  name: pody
spec:
  containers:
  - image: k8s.gcr.io/pause:3.9
    name: pause
  - image: k8s.gcr.io/pause:3.9
    name: pause-again
";

/// Pod `dodo` with an init container and a non-container `image` field.
pub const POD_DODO: &str = "\
apiVersion: v1
kind: Pod
metadata:
  annotations:
    image: not-a-container-image
  name: dodo
spec:
  containers:
  - image: k8s.gcr.io/nginx:1.25
    name: web
  initContainers:
  - image: k8s.gcr.io/busybox:1.36
    name: init
";

/// ServiceAccount and DaemonSet, both named `kube-proxy`, as one
/// multi-document file.
pub const KUBE_PROXY_OBJECTS: &str = "\
apiVersion: v1
kind: ServiceAccount
metadata:
  name: kube-proxy
---
apiVersion: apps/v1
kind: DaemonSet
metadata:
  name: kube-proxy
spec:
  template:
    spec:
      containers:
      - image: k8s.gcr.io/kube-proxy:v1.28.0
        name: kube-proxy
";

/// Component file for `kube-proxy`, referencing files next to it.
pub const KUBE_PROXY_COMPONENT: &str = "\
apiVersion: bundle.dev/v1alpha1
kind: Component
spec:
  componentName: kube-proxy
  version: 1.28.0
  objectFiles:
  - url: kube-proxy-objects.yaml
  rawTextFiles:
  - url: kube-proxy.conf
";

/// Raw text read by the `kube-proxy` component.
pub const KUBE_PROXY_CONFIG: &str = "mode: iptables\n";

/// Bundle with an inline `zork` component and a `kube-proxy` component file.
pub const BUNDLE: &str = "\
apiVersion: bundle.dev/v1alpha1
kind: Bundle
metadata:
  name: cluster-base
version: 1.0.0
components:
- spec:
    componentName: zork
    version: 0.1.0
    objectFiles:
    - url: zork/pody.yaml
    - url: zork/dodo.yaml
componentFiles:
- url: kube-proxy/component.yaml
";

/// Every file of the standard scenario, relative to the bundle directory.
pub const BUNDLE_FILES: &[(&str, &str)] = &[
    ("bundle.yaml", BUNDLE),
    ("zork/pody.yaml", POD_PODY),
    ("zork/dodo.yaml", POD_DODO),
    ("kube-proxy/component.yaml", KUBE_PROXY_COMPONENT),
    ("kube-proxy/kube-proxy-objects.yaml", KUBE_PROXY_OBJECTS),
    ("kube-proxy/kube-proxy.conf", KUBE_PROXY_CONFIG),
];
