/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// HTTP 服务监听端口
    pub port: u16,
    /// 门户登录页 URL
    pub portal_login_url: String,
    /// 考勤报表页 URL
    pub attendance_url: String,
    /// 挑战图片选择器
    pub captcha_selector: String,
    /// NetID 输入框选择器
    pub netid_selector: String,
    /// 密码输入框选择器
    pub password_selector: String,
    /// 挑战码输入框选择器
    pub captcha_input_selector: String,
    /// 登录按钮选择器
    pub submit_button_selector: String,
    /// 考勤表格选择器
    pub attendance_table_selector: String,
    /// 页面动作后的固定等待时间（毫秒）
    pub settle_millis: u64,
    /// 单次远程操作的超时时间（毫秒）
    pub operation_timeout_millis: u64,
    /// 浏览器可执行文件路径（为空则使用系统默认）
    pub chrome_executable: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            portal_login_url:
                "https://sp.srmist.edu.in/srmiststudentportal/students/loginManager/youLogin.jsp"
                    .to_string(),
            attendance_url:
                "https://sp.srmist.edu.in/srmiststudentportal/students/report/studentAttendanceDetails.jsp"
                    .to_string(),
            captcha_selector: "img[src*='captchas']".to_string(),
            netid_selector: "#login".to_string(),
            password_selector: "#passwd".to_string(),
            captcha_input_selector: "#ccode".to_string(),
            submit_button_selector: "button.btn-custom.btn-user.btn-block.lift".to_string(),
            attendance_table_selector: "table.table".to_string(),
            settle_millis: 3000,
            operation_timeout_millis: 30_000,
            chrome_executable: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            port: std::env::var("PORT").ok().and_then(|v| v.parse().ok()).unwrap_or(default.port),
            portal_login_url: std::env::var("PORTAL_LOGIN_URL").unwrap_or(default.portal_login_url),
            attendance_url: std::env::var("PORTAL_ATTENDANCE_URL").unwrap_or(default.attendance_url),
            captcha_selector: std::env::var("CAPTCHA_SELECTOR").unwrap_or(default.captcha_selector),
            netid_selector: std::env::var("NETID_SELECTOR").unwrap_or(default.netid_selector),
            password_selector: std::env::var("PASSWORD_SELECTOR").unwrap_or(default.password_selector),
            captcha_input_selector: std::env::var("CAPTCHA_INPUT_SELECTOR").unwrap_or(default.captcha_input_selector),
            submit_button_selector: std::env::var("SUBMIT_BUTTON_SELECTOR").unwrap_or(default.submit_button_selector),
            attendance_table_selector: std::env::var("ATTENDANCE_TABLE_SELECTOR").unwrap_or(default.attendance_table_selector),
            settle_millis: std::env::var("SETTLE_MILLIS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.settle_millis),
            operation_timeout_millis: std::env::var("OPERATION_TIMEOUT_MILLIS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.operation_timeout_millis),
            chrome_executable: std::env::var("CHROME_EXECUTABLE").ok().or(default.chrome_executable),
        }
    }
}
