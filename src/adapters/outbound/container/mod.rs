/// Container CLI adapters (docker, podman, ...)
mod docker_provisioner;

pub use docker_provisioner::DockerProvisioner;
