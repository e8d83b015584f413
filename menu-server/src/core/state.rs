use std::sync::{Arc, Mutex};

use socketioxide::layer::SocketIoLayer;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tokio_util::sync::CancellationToken;

use crate::auth::JwtService;
use crate::billing::BillingSweepWorker;
use crate::core::Config;
use crate::db::DbService;
use crate::db::repository::{
    AccountRepository, CustomerRepository, DiningTableRepository, ExpenseRepository,
    FeedbackRepository, MenuRegistry, MenuRepository, OrderRepository, ReportRepository,
    StaffRepository,
};
use crate::notify::{LogMailer, Mailer, Outbox, OutboxWorker, SmtpMailer, outbox};
use crate::realtime::RealtimeService;
use shared::error::AppError;

/// 服务器状态 - 持有所有服务的单例引用
///
/// ServerState 是整个后端的核心数据结构，使用 Arc 实现浅拷贝。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Db> | 嵌入式数据库 |
/// | jwt_service | Arc<JwtService> | JWT 认证服务 |
/// | menu_registry | Arc<MenuRegistry> | 菜单作用域注册表 (进程级缓存) |
/// | outbox | Outbox | 邮件发件队列 |
/// | realtime | RealtimeService | socket.io 推送服务 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// JWT 认证服务
    pub jwt_service: Arc<JwtService>,
    /// 菜单作用域注册表 (可注入，测试可 reset)
    pub menu_registry: Arc<MenuRegistry>,
    /// 邮件发件队列
    pub outbox: Outbox,
    /// 实时推送服务
    pub realtime: RealtimeService,
    /// socket.io axum layer
    socket_layer: SocketIoLayer,
    /// 后台任务取消令牌
    shutdown: CancellationToken,
    /// 发件 worker (start_background_tasks 取走并 spawn)
    outbox_worker: Arc<Mutex<Option<OutboxWorker>>>,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：工作目录结构、数据库、邮件传输、发件队列、
    /// 实时推送、JWT 服务。
    ///
    /// # Panics
    ///
    /// 工作目录或数据库初始化失败时 panic
    pub async fn initialize(config: &Config) -> Self {
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        let db_path = config.database_dir().join("menu.db");
        let db_service = DbService::new(&db_path.to_string_lossy())
            .await
            .expect("Failed to initialize database");

        let mailer: Arc<dyn Mailer> = match &config.smtp {
            Some(smtp) => Arc::new(
                SmtpMailer::new(&smtp.host, &smtp.username, &smtp.password, &smtp.from)
                    .expect("Invalid SMTP configuration"),
            ),
            None => {
                tracing::warn!("SMTP not configured, outbound email will only be logged");
                Arc::new(LogMailer)
            }
        };

        Self::assemble(config.clone(), db_service.db, mailer)
    }

    /// 以现有数据库与邮件传输构造状态 (测试入口)
    pub async fn with_db_and_mailer(
        config: Config,
        db: Surreal<Db>,
        mailer: Arc<dyn Mailer>,
    ) -> Result<Self, AppError> {
        let db_service = DbService::with_db(db).await?;
        Ok(Self::assemble(config, db_service.db, mailer))
    }

    fn assemble(config: Config, db: Surreal<Db>, mailer: Arc<dyn Mailer>) -> Self {
        let shutdown = CancellationToken::new();
        let (outbox, outbox_worker) = outbox::channel(mailer, shutdown.clone());
        let (realtime, socket_layer) = RealtimeService::new_layer();
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        Self {
            config,
            db,
            jwt_service,
            menu_registry: Arc::new(MenuRegistry::new()),
            outbox,
            realtime,
            socket_layer,
            shutdown,
            outbox_worker: Arc::new(Mutex::new(Some(outbox_worker))),
        }
    }

    /// 启动后台任务
    ///
    /// 必须在 `Server::run()` 之前调用
    ///
    /// 启动的任务：
    /// - 发件队列 worker (OutboxWorker)
    /// - 账单扫描 worker (BillingSweepWorker, 每日一次)
    pub fn start_background_tasks(&self) {
        if let Some(worker) = self.outbox_worker.lock().expect("outbox worker lock").take() {
            tokio::spawn(worker.run());
        }
        let sweep = BillingSweepWorker::new(self.clone(), self.shutdown.clone());
        tokio::spawn(sweep.run());
    }

    /// 请求关闭所有后台任务
    pub fn shutdown_background_tasks(&self) {
        self.shutdown.cancel();
    }

    /// 获取数据库实例
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// 获取 JWT 服务
    pub fn jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// 获取发件队列
    pub fn outbox(&self) -> &Outbox {
        &self.outbox
    }

    /// 获取 socket.io layer (挂载到 Router)
    pub fn socket_layer(&self) -> SocketIoLayer {
        self.socket_layer.clone()
    }

    // ========== Repositories ==========

    pub fn accounts(&self) -> AccountRepository {
        AccountRepository::new(self.db.clone())
    }

    pub fn menu(&self) -> MenuRepository {
        MenuRepository::new(self.db.clone())
    }

    pub fn orders(&self) -> OrderRepository {
        OrderRepository::new(self.db.clone())
    }

    pub fn staff(&self) -> StaffRepository {
        StaffRepository::new(self.db.clone())
    }

    pub fn tables(&self) -> DiningTableRepository {
        DiningTableRepository::new(self.db.clone())
    }

    pub fn expenses(&self) -> ExpenseRepository {
        ExpenseRepository::new(self.db.clone())
    }

    pub fn feedback(&self) -> FeedbackRepository {
        FeedbackRepository::new(self.db.clone())
    }

    pub fn customers(&self) -> CustomerRepository {
        CustomerRepository::new(self.db.clone())
    }

    pub fn reports(&self) -> ReportRepository {
        ReportRepository::new(self.db.clone())
    }
}
