// ABOUTME: OpenSSH server container for transport integration tests.
// ABOUTME: Starts one password-login server per test binary via bollard and removes it on exit.

use bollard::Docker;
use bollard::models::ContainerCreateBody;
use bollard::query_parameters::{
    CreateContainerOptions, CreateImageOptions, RemoveContainerOptions, StopContainerOptions,
};
use futures::StreamExt;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use webdeploy::config::{DeployConfig, RunOptions, Settings};
use webdeploy::project::ProjectManifest;
use webdeploy::ssh::SessionConfig;

const IMAGE: &str = "lscr.io/linuxserver/openssh-server:latest";
const SSH_PORT: u16 = 2222;
pub const TEST_USER: &str = "deployer";
pub const TEST_PASSWORD: &str = "webdeploy-test";
/// Writable home of the test user inside the image.
pub const REMOTE_HOME: &str = "/config";

static CONTAINER_ID: OnceLock<String> = OnceLock::new();

#[ctor::dtor]
fn remove_on_exit() {
    let Some(id) = CONTAINER_ID.get() else {
        return;
    };
    let Ok(rt) = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    else {
        return;
    };
    rt.block_on(async {
        if let Ok(docker) = Docker::connect_with_local_defaults() {
            let _ = docker
                .stop_container(id, None::<StopContainerOptions>)
                .await;
            let _ = docker
                .remove_container(
                    id,
                    Some(RemoveContainerOptions {
                        force: true,
                        ..Default::default()
                    }),
                )
                .await;
        }
    });
}

static SHARED_CONTAINER: tokio::sync::OnceCell<SshContainer> = tokio::sync::OnceCell::const_new();

/// The SSH server shared by every test in this binary.
pub async fn shared_container() -> &'static SshContainer {
    SHARED_CONTAINER
        .get_or_init(|| async {
            SshContainer::start()
                .await
                .expect("failed to start SSH container")
        })
        .await
}

pub struct SshContainer {
    port: u16,
    known_hosts: PathBuf,
}

impl SshContainer {
    async fn start() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let docker = Docker::connect_with_local_defaults()?;

        let mut pull_stream = docker.create_image(
            Some(CreateImageOptions {
                from_image: Some(IMAGE.to_string()),
                ..Default::default()
            }),
            None,
            None,
        );
        while let Some(result) = pull_stream.next().await {
            result?;
        }

        let port = Self::find_available_port().await?;

        let env = vec![
            "PUID=1000".to_string(),
            "PGID=1000".to_string(),
            format!("USER_NAME={}", TEST_USER),
            "PASSWORD_ACCESS=true".to_string(),
            format!("USER_PASSWORD={}", TEST_PASSWORD),
        ];

        let mut port_bindings = HashMap::new();
        port_bindings.insert(
            format!("{}/tcp", SSH_PORT),
            Some(vec![bollard::models::PortBinding {
                host_ip: Some("127.0.0.1".to_string()),
                host_port: Some(port.to_string()),
            }]),
        );

        let config = ContainerCreateBody {
            image: Some(IMAGE.to_string()),
            env: Some(env),
            host_config: Some(bollard::models::HostConfig {
                port_bindings: Some(port_bindings),
                ..Default::default()
            }),
            ..Default::default()
        };

        let container = docker
            .create_container(
                Some(CreateContainerOptions {
                    name: Some(format!("webdeploy-ssh-test-{}", std::process::id())),
                    ..Default::default()
                }),
                config,
            )
            .await?;
        let _ = CONTAINER_ID.set(container.id.clone());

        docker
            .start_container(
                &container.id,
                None::<bollard::query_parameters::StartContainerOptions>,
            )
            .await?;

        Self::wait_for_ssh(port).await?;

        // Fresh per run so the user's own known_hosts is never touched
        let known_hosts =
            std::env::temp_dir().join(format!("webdeploy-known-hosts-{}", std::process::id()));
        let _ = std::fs::remove_file(&known_hosts);

        Ok(Self { port, known_hosts })
    }

    /// Password-authenticated session settings for this server.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig::new("127.0.0.1", TEST_USER)
            .port(self.port)
            .password(TEST_PASSWORD)
            .trust_on_first_use(true)
            .known_hosts_path(&self.known_hosts)
    }

    /// A deploy configuration for `project` that targets this server under `remote_prefix`.
    pub fn deploy_config(
        &self,
        project_dir: &Path,
        remote_prefix: &str,
        project: &str,
    ) -> DeployConfig {
        let settings = Settings {
            host: "127.0.0.1".to_string(),
            port: self.port,
            remote_prefix: remote_prefix.to_string(),
            known_hosts: Some(self.known_hosts.clone()),
            trust_first_connection: true,
            ..Default::default()
        };
        let manifest = ProjectManifest {
            name: project.to_string(),
        };
        let options = RunOptions {
            user: Some(TEST_USER.to_string()),
            password: Some(TEST_PASSWORD.to_string()),
            skip_build: true,
            ..Default::default()
        };
        DeployConfig::new(settings, &manifest, project_dir, options)
    }

    async fn find_available_port() -> Result<u16, Box<dyn std::error::Error + Send + Sync>> {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let port = listener.local_addr()?.port();
        drop(listener);
        Ok(port)
    }

    async fn wait_for_ssh(port: u16) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        use tokio::io::AsyncReadExt;

        let addr = format!("127.0.0.1:{}", port);
        for _ in 0..60 {
            if let Ok(mut stream) = tokio::net::TcpStream::connect(&addr).await {
                let mut buf = [0u8; 32];
                if let Ok(Ok(n)) =
                    tokio::time::timeout(std::time::Duration::from_secs(2), stream.read(&mut buf))
                        .await
                    && n > 0
                    && buf[..n].starts_with(b"SSH-")
                {
                    // sshd answers before the user is provisioned
                    tokio::time::sleep(std::time::Duration::from_secs(2)).await;
                    return Ok(());
                }
            }
            tokio::time::sleep(std::time::Duration::from_millis(500)).await;
        }
        Err("SSH container did not become ready in time".into())
    }
}
