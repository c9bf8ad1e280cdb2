use dashmap::DashMap;
use std::time::{Duration, Instant};

/// 限流窗口长度
const WINDOW: Duration = Duration::from_secs(60);

pub type Clock = Box<dyn Fn() -> Instant + Send + Sync>;

/// 滑动窗口限流器 (按客户端 key，窗口 60 秒)
///
/// 每个 key 维护窗口内的请求时间戳列表；DashMap 的 entry 锁保证
/// 同一 key 的并发请求不会互相漏计。时钟可注入，便于测试控制时间。
///
/// TODO: key 集合没有淘汰策略，长时间运行会为不再活跃的客户端
/// 累积窗口记录，需要补一个空闲 key 的定期清理。
pub struct RateLimiter {
    requests: DashMap<String, Vec<Instant>>,
    limit: usize,
    clock: Clock,
}

impl RateLimiter {
    pub fn new(limit: usize) -> Self {
        Self::with_clock(limit, Box::new(Instant::now))
    }

    pub fn with_clock(limit: usize, clock: Clock) -> Self {
        Self {
            requests: DashMap::new(),
            limit,
            clock,
        }
    }

    /// 每分钟允许的请求数
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// 准入检查：清理过期记录后判断是否超限，未超限则记录本次请求
    pub fn check(&self, client_key: &str) -> bool {
        let now = (self.clock)();
        let mut window = self.requests.entry(client_key.to_string()).or_default();

        window.retain(|t| now.duration_since(*t) < WINDOW);

        if window.len() >= self.limit {
            return false;
        }

        window.push(now);
        true
    }
}
